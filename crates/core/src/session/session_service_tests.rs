//! Tests for the session lifecycle and the commit loop behind every
//! mutation.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tokio::sync::Notify;

    use crate::cards::NewCard;
    use crate::challenges::ChallengeStatus;
    use crate::errors::{AuthError, Error, Result, StoreError, ValidationError};
    use crate::events::{MockSessionEventSink, SessionEvent};
    use crate::goals::{GoalUpsert, NewGoal};
    use crate::households::{
        FamilyProfile, Household, HouseholdStoreTrait, Revision, StoredHousehold,
    };
    use crate::members::{Member, MemberRole, MemberUpsert, NewMember};
    use crate::session::*;
    use crate::transactions::{Category, NewTransaction, PaymentMethod, TransactionKind};

    // ============================================================================
    // Fixtures
    // ============================================================================

    fn authenticated(uid: &str, display_name: Option<&str>) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: uid.to_string(),
            email: format!("{}@example.com", uid),
            display_name: display_name.map(str::to_string),
            id_token: format!("id-token-{}", uid),
            refresh_token: format!("refresh-{}", uid),
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    #[derive(Default)]
    struct MockIdentity {
        reject_credentials: bool,
        register_calls: Mutex<u32>,
        refresh_calls: Mutex<u32>,
    }

    #[async_trait]
    impl IdentityProviderTrait for MockIdentity {
        async fn sign_in(&self, _email: &str, _password: &str) -> Result<AuthenticatedUser> {
            if self.reject_credentials {
                return Err(AuthError::InvalidCredentials.into());
            }
            Ok(authenticated("uid-1", None))
        }

        async fn register(
            &self,
            name: &str,
            _email: &str,
            _password: &str,
        ) -> Result<AuthenticatedUser> {
            *self.register_calls.lock().unwrap() += 1;
            Ok(authenticated("uid-1", Some(name)))
        }

        async fn sign_in_federated(
            &self,
            _credential: &FederatedCredential,
        ) -> Result<AuthenticatedUser> {
            Ok(authenticated("uid-1", Some("Ana")))
        }

        async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens> {
            *self.refresh_calls.lock().unwrap() += 1;
            Ok(SessionTokens {
                user_id: "uid-1".to_string(),
                id_token: format!("minted-after-{}", refresh_token),
                refresh_token: "refresh-uid-1-rotated".to_string(),
                expires_at: Utc::now() + Duration::hours(1),
            })
        }
    }

    /// Pauses `replace` mid-flight so a test can interleave other calls
    /// between the write being sent and its echo returning.
    #[derive(Default)]
    struct ReplaceGate {
        entered: Notify,
        release: Notify,
    }

    /// In-memory document store issuing `rev-N` tokens and enforcing them
    /// on replace, like the real backend does.
    #[derive(Default)]
    struct MemoryHouseholdStore {
        doc: Mutex<Option<(Household, u64)>>,
        fail_loads: bool,
        always_conflict: bool,
        create_calls: Mutex<u32>,
        replace_calls: Mutex<u32>,
        gate: Mutex<Option<Arc<ReplaceGate>>>,
    }

    impl MemoryHouseholdStore {
        fn seeded(household: Household) -> Self {
            let store = MemoryHouseholdStore::default();
            *store.doc.lock().unwrap() = Some((household, 1));
            store
        }

        fn revision(n: u64) -> Revision {
            Revision::new(format!("rev-{}", n))
        }

        /// Overwrites the document the way a concurrent writer would,
        /// bumping the revision without telling anyone.
        fn write_behind(&self, mutate: impl FnOnce(Household) -> Household) {
            let mut doc = self.doc.lock().unwrap();
            let (household, n) = doc.take().unwrap();
            *doc = Some((mutate(household), n + 1));
        }

        fn document(&self) -> Household {
            self.doc.lock().unwrap().as_ref().unwrap().0.clone()
        }

        fn create_calls(&self) -> u32 {
            *self.create_calls.lock().unwrap()
        }

        fn replace_calls(&self) -> u32 {
            *self.replace_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl HouseholdStoreTrait for MemoryHouseholdStore {
        async fn load(&self, _user: &AuthenticatedUser) -> Result<Option<StoredHousehold>> {
            if self.fail_loads {
                return Err(StoreError::Http("connection reset".to_string()).into());
            }
            Ok(self
                .doc
                .lock()
                .unwrap()
                .as_ref()
                .map(|(household, n)| StoredHousehold {
                    household: household.clone(),
                    revision: Self::revision(*n),
                }))
        }

        async fn create(
            &self,
            user: &AuthenticatedUser,
            household: &Household,
        ) -> Result<StoredHousehold> {
            *self.create_calls.lock().unwrap() += 1;
            let mut doc = self.doc.lock().unwrap();
            if doc.is_some() {
                return Err(StoreError::AlreadyExists(user.user_id.clone()).into());
            }
            *doc = Some((household.clone(), 1));
            Ok(StoredHousehold {
                household: household.clone(),
                revision: Self::revision(1),
            })
        }

        async fn replace(
            &self,
            user: &AuthenticatedUser,
            household: &Household,
            expected: &Revision,
        ) -> Result<StoredHousehold> {
            *self.replace_calls.lock().unwrap() += 1;
            let gate = self.gate.lock().unwrap().clone();
            if let Some(gate) = gate {
                gate.entered.notify_one();
                gate.release.notified().await;
            }
            if self.always_conflict {
                return Err(StoreError::RevisionConflict(user.user_id.clone()).into());
            }
            let mut doc = self.doc.lock().unwrap();
            let Some((_, n)) = doc.as_ref() else {
                return Err(StoreError::NotFound(user.user_id.clone()).into());
            };
            if *expected != Self::revision(*n) {
                return Err(StoreError::RevisionConflict(user.user_id.clone()).into());
            }
            let next = *n + 1;
            *doc = Some((household.clone(), next));
            Ok(StoredHousehold {
                household: household.clone(),
                revision: Self::revision(next),
            })
        }
    }

    struct Fixture {
        service: Arc<SessionService>,
        identity: Arc<MockIdentity>,
        store: Arc<MemoryHouseholdStore>,
        events: Arc<MockSessionEventSink>,
    }

    fn fixture_with(identity: MockIdentity, store: MemoryHouseholdStore) -> Fixture {
        let identity = Arc::new(identity);
        let store = Arc::new(store);
        let events = Arc::new(MockSessionEventSink::new());
        let service = Arc::new(SessionService::new(
            identity.clone(),
            store.clone(),
            events.clone(),
        ));
        Fixture {
            service,
            identity,
            store,
            events,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(MockIdentity::default(), MemoryHouseholdStore::default())
    }

    fn seeded_fixture() -> Fixture {
        fixture_with(
            MockIdentity::default(),
            MemoryHouseholdStore::seeded(seeded_household()),
        )
    }

    /// A household another device already wrote: owner Helena, default
    /// profile and challenge catalog.
    fn seeded_household() -> Household {
        Household::bootstrap(Member {
            id: "m1".to_string(),
            name: "Helena".to_string(),
            avatar: "🦉".to_string(),
            role: MemberRole::Administrador,
            title: "Mãe".to_string(),
            income_source: Some("Salário".to_string()),
        })
    }

    fn expense(description: &str, amount: &str) -> NewTransaction {
        NewTransaction {
            kind: TransactionKind::Expense,
            description: description.to_string(),
            amount: amount.to_string(),
            date: "2025-06-10".to_string(),
            category: Category::Mercado,
            member_id: "m1".to_string(),
            payment_method: Some(PaymentMethod::Pix),
            location: None,
            income_source: None,
        }
    }

    fn registration() -> Registration {
        Registration {
            name: "Ana".to_string(),
            title: "Mãe".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret123".to_string(),
        }
    }

    // ============================================================================
    // Sign-in and registration
    // ============================================================================

    #[tokio::test]
    async fn test_sign_in_adopts_stored_household() {
        let f = seeded_fixture();
        f.service
            .sign_in("helena@example.com", "secret")
            .await
            .unwrap();

        assert!(f.service.is_signed_in().await);
        let household = f.service.household().await.unwrap();
        assert_eq!(household.owner().unwrap().name, "Helena");
        assert_eq!(f.store.create_calls(), 0);
        assert_eq!(
            f.events.events(),
            vec![SessionEvent::SignedIn {
                user_id: "uid-1".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_sign_in_bootstraps_missing_household() {
        let f = fixture();
        f.service.sign_in("novo@example.com", "secret").await.unwrap();

        let household = f.service.household().await.unwrap();
        let owner = household.owner().unwrap().clone();
        assert_eq!(owner.id, "m1");
        assert_eq!(owner.name, "Eu");
        assert_eq!(owner.title, "Admin");
        assert!(owner.is_admin());
        assert_eq!(household.family_profile.name, "Minha Família");
        assert_eq!(household.challenges.len(), 3);
        assert!(household.transactions.is_empty());
        assert!(!household.has_seen_onboarding);

        // The default document was persisted, not just held in memory.
        assert_eq!(f.store.create_calls(), 1);
        assert_eq!(f.store.document().owner().unwrap().name, "Eu");
    }

    #[tokio::test]
    async fn test_bootstrap_uses_the_identity_display_name() {
        let f = fixture();
        f.service
            .sign_in_federated(FederatedCredential {
                provider: "google.com".to_string(),
                id_token: "oauth-token".to_string(),
            })
            .await
            .unwrap();

        let household = f.service.household().await.unwrap();
        assert_eq!(household.owner().unwrap().id, "m1");
        assert_eq!(household.owner().unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn test_rejected_credentials_stay_signed_out() {
        let f = fixture_with(
            MockIdentity {
                reject_credentials: true,
                ..Default::default()
            },
            MemoryHouseholdStore::default(),
        );
        let err = f
            .service
            .sign_in("x@example.com", "bad")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials)));
        assert!(!f.service.is_signed_in().await);
        assert!(f.events.is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_abandons_the_sign_in() {
        let f = fixture_with(
            MockIdentity::default(),
            MemoryHouseholdStore {
                fail_loads: true,
                ..Default::default()
            },
        );
        let err = f
            .service
            .sign_in("x@example.com", "secret")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::Http(_))));
        assert!(!f.service.is_signed_in().await);
        assert!(f.events.is_empty());
    }

    #[tokio::test]
    async fn test_register_writes_the_registration_shape() {
        let f = fixture();
        f.service.register(registration()).await.unwrap();

        let household = f.service.household().await.unwrap();
        let owner = household.owner().unwrap();
        assert!(owner.id.starts_with('m'));
        assert_eq!(owner.name, "Ana");
        assert_eq!(owner.title, "Mãe");
        assert_eq!(owner.avatar, "😊");
        assert!(owner.is_admin());
        assert_eq!(household.members.len(), 1);
        assert_eq!(household.challenges[0].status, ChallengeStatus::Available);
        assert!(!household.has_seen_onboarding);
        assert_eq!(f.store.create_calls(), 1);
        assert_eq!(
            f.events.events(),
            vec![SessionEvent::SignedIn {
                user_id: "uid-1".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_register_rejects_blank_name_before_any_call() {
        let f = fixture();
        let err = f
            .service
            .register(Registration {
                name: "   ".to_string(),
                ..registration()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(_))
        ));
        assert_eq!(*f.identity.register_calls.lock().unwrap(), 0);
        assert_eq!(f.store.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_register_adopts_existing_document_on_create_race() {
        let f = seeded_fixture();
        f.service.register(registration()).await.unwrap();

        // The earlier writer's document wins over the fresh bootstrap.
        let household = f.service.household().await.unwrap();
        assert_eq!(household.owner().unwrap().name, "Helena");
        assert!(f.service.is_signed_in().await);
    }

    // ============================================================================
    // Sign-out and refresh
    // ============================================================================

    #[tokio::test]
    async fn test_sign_out_drops_state_and_emits() {
        let f = fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();
        f.events.clear();

        f.service.sign_out().await;
        assert!(!f.service.is_signed_in().await);
        assert!(f.service.household().await.is_none());
        assert!(f.service.acting_member().await.is_none());
        assert_eq!(f.events.events(), vec![SessionEvent::SignedOut]);
    }

    #[tokio::test]
    async fn test_sign_out_without_session_is_silent() {
        let f = fixture();
        f.service.sign_out().await;
        assert!(f.events.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_session_swaps_tokens_in_place() {
        let f = seeded_fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        f.service.refresh_session().await.unwrap();
        let user = f.service.current_user().await.unwrap();
        assert_eq!(user.id_token, "minted-after-refresh-uid-1");
        assert_eq!(user.refresh_token, "refresh-uid-1-rotated");
        // Identity fields and the household are untouched by a refresh.
        assert_eq!(user.email, "uid-1@example.com");
        let household = f.service.household().await.unwrap();
        assert_eq!(household.owner().unwrap().name, "Helena");
    }

    #[tokio::test]
    async fn test_refresh_session_without_session_is_a_no_op() {
        let f = fixture();
        f.service.refresh_session().await.unwrap();
        assert_eq!(*f.identity.refresh_calls.lock().unwrap(), 0);
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    #[tokio::test]
    async fn test_add_transaction_prepends_newest_first() {
        let f = seeded_fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();
        f.events.clear();

        f.service
            .add_transaction(expense("Feira", "50"))
            .await
            .unwrap();
        f.service
            .add_transaction(expense("Padaria", "12.5"))
            .await
            .unwrap();

        let household = f.service.household().await.unwrap();
        assert_eq!(household.transactions.len(), 2);
        assert_eq!(household.transactions[0].description, "Padaria");
        assert_eq!(household.transactions[0].amount, dec!(-12.5));
        assert_eq!(household.transactions[1].description, "Feira");
        // Each commit adopted the echoed revision, so neither conflicted.
        assert_eq!(f.store.replace_calls(), 2);
        assert_eq!(f.store.document().transactions.len(), 2);
        assert_eq!(
            f.events.events(),
            vec![
                SessionEvent::HouseholdChanged,
                SessionEvent::HouseholdChanged
            ]
        );
    }

    #[tokio::test]
    async fn test_rapid_adds_mint_distinct_ids() {
        let f = seeded_fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        for i in 0..3 {
            f.service
                .add_transaction(expense(&format!("Compra {}", i), "10"))
                .await
                .unwrap();
        }
        let household = f.service.household().await.unwrap();
        let ids: HashSet<&str> = household
            .transactions
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|id| id.starts_with('t')));
    }

    #[tokio::test]
    async fn test_mutation_while_signed_out_is_ignored() {
        let f = fixture();
        f.service
            .add_transaction(expense("Feira", "50"))
            .await
            .unwrap();
        assert_eq!(f.store.replace_calls(), 0);
        assert!(f.events.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_amount_never_reaches_the_store() {
        let f = seeded_fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        let err = f
            .service
            .add_transaction(expense("Feira", "abc"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidAmount(_))
        ));
        assert_eq!(f.store.replace_calls(), 0);
    }

    #[tokio::test]
    async fn test_save_member_create_appends() {
        let f = seeded_fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        f.service
            .save_member(MemberUpsert::Create(NewMember {
                name: "Léo".to_string(),
                avatar: "🦁".to_string(),
                role: MemberRole::Membro,
                title: "Filho".to_string(),
                income_source: None,
            }))
            .await
            .unwrap();

        let household = f.service.household().await.unwrap();
        assert_eq!(household.members.len(), 2);
        let added = &household.members[1];
        assert_eq!(added.name, "Léo");
        assert!(added.id.starts_with('m'));
        assert_ne!(added.id, "m1");
        // The founder stays first, so they remain the acting member.
        assert_eq!(f.service.acting_member().await.unwrap().name, "Helena");
    }

    #[tokio::test]
    async fn test_edit_member_replaces_in_place() {
        let f = seeded_fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        let mut owner = f.service.household().await.unwrap().owner().unwrap().clone();
        owner.name = "Helena Souza".to_string();
        f.service
            .save_member(MemberUpsert::Edit(owner))
            .await
            .unwrap();

        let household = f.service.household().await.unwrap();
        assert_eq!(household.members.len(), 1);
        assert_eq!(household.members[0].name, "Helena Souza");
    }

    #[tokio::test]
    async fn test_edit_unknown_member_is_rejected() {
        let f = seeded_fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        let stranger = Member {
            id: "m404".to_string(),
            name: "Ninguém".to_string(),
            avatar: "👻".to_string(),
            role: MemberRole::Membro,
            title: "Primo".to_string(),
            income_source: None,
        };
        let err = f
            .service
            .save_member(MemberUpsert::Edit(stranger))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnknownId(_, "members"))
        ));
        assert_eq!(f.store.replace_calls(), 0);
        assert_eq!(f.service.household().await.unwrap().members.len(), 1);
    }

    #[tokio::test]
    async fn test_save_goal_create_starts_with_nothing_saved() {
        let f = seeded_fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        f.service
            .save_goal(GoalUpsert::Create(NewGoal {
                name: "Viagem".to_string(),
                target_amount: "2500".to_string(),
                illustration: "✈️".to_string(),
                deadline: None,
            }))
            .await
            .unwrap();

        let household = f.service.household().await.unwrap();
        let goal = household.goals.last().unwrap();
        assert!(goal.id.starts_with('g'));
        assert_eq!(goal.target_amount, dec!(2500));
        assert_eq!(goal.current_amount, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_edit_unknown_goal_is_rejected() {
        let f = seeded_fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        f.service
            .save_goal(GoalUpsert::Create(NewGoal {
                name: "Viagem".to_string(),
                target_amount: "2500".to_string(),
                illustration: "✈️".to_string(),
                deadline: None,
            }))
            .await
            .unwrap();
        let mut goal = f.service.household().await.unwrap().goals[0].clone();
        goal.id = "g404".to_string();

        let err = f
            .service
            .save_goal(GoalUpsert::Edit(goal))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnknownId(_, "goals"))
        ));
    }

    #[tokio::test]
    async fn test_add_card_validates_the_digits_first() {
        let f = seeded_fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        let err = f
            .service
            .add_card(NewCard {
                name: "Nubank".to_string(),
                last4: "12a4".to_string(),
                issuer: Default::default(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidCardDigits(_))
        ));
        assert_eq!(f.store.replace_calls(), 0);

        f.service
            .add_card(NewCard {
                name: "Nubank".to_string(),
                last4: "1234".to_string(),
                issuer: Default::default(),
            })
            .await
            .unwrap();
        assert_eq!(f.service.household().await.unwrap().cards.len(), 1);
    }

    #[tokio::test]
    async fn test_update_family_profile_persists() {
        let f = seeded_fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        f.service
            .update_family_profile(FamilyProfile {
                name: "Família Souza".to_string(),
                avatar: "🏡".to_string(),
                created_at: None,
            })
            .await
            .unwrap();

        let household = f.service.household().await.unwrap();
        assert_eq!(household.family_profile.name, "Família Souza");
        assert_eq!(f.store.document().family_profile.name, "Família Souza");
    }

    #[tokio::test]
    async fn test_advance_challenge_walks_the_lifecycle() {
        let f = fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        let id = f.service.household().await.unwrap().challenges[0].id.clone();
        f.service.advance_challenge(&id).await.unwrap();
        let status = f.service.household().await.unwrap().challenges[0].status;
        assert_eq!(status, ChallengeStatus::Active);

        f.service.advance_challenge(&id).await.unwrap();
        let status = f.service.household().await.unwrap().challenges[0].status;
        assert_eq!(status, ChallengeStatus::Completed);

        // Completed is terminal.
        f.service.advance_challenge(&id).await.unwrap();
        let status = f.service.household().await.unwrap().challenges[0].status;
        assert_eq!(status, ChallengeStatus::Completed);
    }

    #[tokio::test]
    async fn test_advance_unknown_challenge_is_rejected() {
        let f = fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        let err = f.service.advance_challenge("c404").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnknownId(_, "challenges"))
        ));
    }

    #[tokio::test]
    async fn test_mark_onboarding_seen_writes_only_once() {
        let f = fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();
        assert!(!f.service.household().await.unwrap().has_seen_onboarding);

        f.service.mark_onboarding_seen().await.unwrap();
        assert!(f.service.household().await.unwrap().has_seen_onboarding);
        assert_eq!(f.store.replace_calls(), 1);

        // Already seen, nothing to write.
        f.service.mark_onboarding_seen().await.unwrap();
        assert_eq!(f.store.replace_calls(), 1);
    }

    #[tokio::test]
    async fn test_mark_onboarding_seen_without_session_is_silent() {
        let f = fixture();
        f.service.mark_onboarding_seen().await.unwrap();
        assert_eq!(f.store.replace_calls(), 0);
    }

    // ============================================================================
    // Revision races
    // ============================================================================

    #[tokio::test]
    async fn test_lost_race_reapplies_on_the_fresh_document() {
        let f = seeded_fixture();
        f.service.sign_in("x@example.com", "secret").await.unwrap();

        // Another device adds a member after our snapshot was taken.
        f.store.write_behind(|household| {
            household.with_member(Member {
                id: "m2".to_string(),
                name: "Léo".to_string(),
                avatar: "🦁".to_string(),
                role: MemberRole::Membro,
                title: "Filho".to_string(),
                income_source: None,
            })
        });

        f.service
            .add_transaction(expense("Feira", "50"))
            .await
            .unwrap();

        // The first replace lost; the update was reapplied on the fresh
        // document, so neither change was clobbered.
        assert_eq!(f.store.replace_calls(), 2);
        let document = f.store.document();
        assert_eq!(document.members.len(), 2);
        assert_eq!(document.transactions.len(), 1);
        assert_eq!(document.transactions[0].description, "Feira");
        assert_eq!(f.service.household().await.unwrap().members.len(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_conflicts_surface_the_error() {
        let mut store = MemoryHouseholdStore::seeded(seeded_household());
        store.always_conflict = true;
        let f = fixture_with(MockIdentity::default(), store);
        f.service.sign_in("x@example.com", "secret").await.unwrap();
        f.events.clear();

        let err = f
            .service
            .add_transaction(expense("Feira", "50"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Store(StoreError::RevisionConflict(_))
        ));
        assert_eq!(f.store.replace_calls(), 3);
        // The session keeps its last adopted aggregate untouched.
        assert!(f.service.household().await.unwrap().transactions.is_empty());
        assert!(f.events.is_empty());
    }

    #[tokio::test]
    async fn test_echo_landing_after_sign_out_is_discarded() {
        let gate = Arc::new(ReplaceGate::default());
        let store = MemoryHouseholdStore::seeded(seeded_household());
        *store.gate.lock().unwrap() = Some(gate.clone());
        let f = fixture_with(MockIdentity::default(), store);
        f.service.sign_in("x@example.com", "secret").await.unwrap();
        f.events.clear();

        let service = f.service.clone();
        let pending =
            tokio::spawn(async move { service.add_transaction(expense("Feira", "50")).await });
        gate.entered.notified().await;

        // The user signs out while the write is in flight.
        f.service.sign_out().await;
        gate.release.notify_one();
        pending.await.unwrap().unwrap();

        // The write itself went through, but the dead session adopted
        // nothing and no change event fired.
        assert!(f.service.household().await.is_none());
        assert_eq!(f.events.events(), vec![SessionEvent::SignedOut]);
        assert_eq!(f.store.document().transactions.len(), 1);
    }
}
