use log::{debug, error, warn};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::session_model::{ActiveSession, AuthenticatedUser, FederatedCredential, Registration};
use super::session_traits::IdentityProviderTrait;
use crate::cards::NewCard;
use crate::errors::{Error, Result, StoreError, ValidationError};
use crate::events::{SessionEvent, SessionEventSink};
use crate::goals::GoalUpsert;
use crate::households::{FamilyProfile, Household, HouseholdStoreTrait, StoredHousehold};
use crate::ids;
use crate::members::{Member, MemberUpsert};
use crate::transactions::NewTransaction;

/// How many times a commit reapplies its update after losing a revision
/// race before giving up.
const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// The one stateful object in the crate: authentication, the signed-in
/// user's household, and every mutation of it.
///
/// Mutations follow a single template: validate the payload, apply a pure
/// structural update to the current aggregate, persist the whole document
/// conditionally on its revision, and adopt only the store's echo. When a
/// concurrent writer wins the revision race, the update is reapplied to the
/// freshly loaded document a bounded number of times.
///
/// Mutations while signed out are ignored (logged, not errors): screens may
/// still fire callbacks while teardown is in flight.
pub struct SessionService {
    identity: Arc<dyn IdentityProviderTrait>,
    store: Arc<dyn HouseholdStoreTrait>,
    events: Arc<dyn SessionEventSink>,
    state: RwLock<Option<ActiveSession>>,
}

impl SessionService {
    pub fn new(
        identity: Arc<dyn IdentityProviderTrait>,
        store: Arc<dyn HouseholdStoreTrait>,
        events: Arc<dyn SessionEventSink>,
    ) -> Self {
        SessionService {
            identity,
            store,
            events,
            state: RwLock::new(None),
        }
    }

    // --- Session lifecycle --------------------------------------------------

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        let user = self.identity.sign_in(email, password).await?;
        self.establish(user).await
    }

    pub async fn sign_in_federated(&self, credential: FederatedCredential) -> Result<()> {
        let user = self.identity.sign_in_federated(&credential).await?;
        self.establish(user).await
    }

    /// Creates the account, writes the registration-shaped household, and
    /// signs the new user in.
    pub async fn register(&self, registration: Registration) -> Result<()> {
        registration.validate()?;
        let user = self
            .identity
            .register(
                registration.name.trim(),
                registration.email.trim(),
                &registration.password,
            )
            .await?;

        let founder = Member::founding_admin(
            ids::mint_entity_id(ids::MEMBER_ID_PREFIX),
            registration.name.trim().to_string(),
            registration.title.trim().to_string(),
        );
        let household = Household::bootstrap(founder);

        let stored = match self.store.create(&user, &household).await {
            Ok(stored) => stored,
            // Another device finished registration first; theirs wins.
            Err(Error::Store(StoreError::AlreadyExists(_))) => self.load_existing(&user).await?,
            Err(e) => {
                error!("Registration data write failed: {}", e);
                return Err(e);
            }
        };

        self.install(user, stored).await;
        Ok(())
    }

    /// Drops all session state. There is nothing to revoke remotely:
    /// discarding the tokens ends the session.
    pub async fn sign_out(&self) {
        let had_session = {
            let mut guard = self.state.write().await;
            guard.take().is_some()
        };
        if had_session {
            self.events.emit(SessionEvent::SignedOut);
        }
    }

    /// Trades the held refresh token for fresh session tokens, keeping the
    /// household in place. Surfaces `AuthError::SessionExpired` when the
    /// token is no longer good; the shell decides whether to sign out.
    pub async fn refresh_session(&self) -> Result<()> {
        let refresh_token = {
            let guard = self.state.read().await;
            guard.as_ref().map(|s| s.user.refresh_token.clone())
        };
        let Some(token) = refresh_token else {
            debug!("refresh_session: no active session, ignoring");
            return Ok(());
        };

        let tokens = self.identity.refresh(&token).await?;
        let mut guard = self.state.write().await;
        if let Some(session) = guard.as_mut() {
            // The session may have been handed to another user while the
            // request was in flight; stale tokens are dropped.
            if session.user.user_id == tokens.user_id {
                session.user = session.user.clone().with_tokens(tokens);
            }
        }
        Ok(())
    }

    // --- Read accessors -----------------------------------------------------

    pub async fn is_signed_in(&self) -> bool {
        self.state.read().await.is_some()
    }

    /// Snapshot of the signed-in user's aggregate.
    pub async fn household(&self) -> Option<Household> {
        self.state
            .read()
            .await
            .as_ref()
            .map(|s| s.household.clone())
    }

    pub async fn current_user(&self) -> Option<AuthenticatedUser> {
        self.state.read().await.as_ref().map(|s| s.user.clone())
    }

    /// The member acting on this device: the first member of the household.
    pub async fn acting_member(&self) -> Option<Member> {
        self.state
            .read()
            .await
            .as_ref()
            .and_then(|s| s.household.owner().cloned())
    }

    // --- Mutations ----------------------------------------------------------

    /// Records a cash movement. The id is minted once; the signed amount is
    /// derived during validation.
    pub async fn add_transaction(&self, input: NewTransaction) -> Result<()> {
        let id = ids::mint_entity_id(ids::TRANSACTION_ID_PREFIX);
        let transaction = input.into_transaction(id)?;
        self.commit("add_transaction", move |household| {
            Ok(household.with_transaction(transaction.clone()))
        })
        .await
    }

    /// Adds a member or edits an existing one. Editing an unknown id is
    /// rejected without a write.
    pub async fn save_member(&self, upsert: MemberUpsert) -> Result<()> {
        match upsert {
            MemberUpsert::Create(input) => {
                input.validate()?;
                let member = input.into_member(ids::mint_entity_id(ids::MEMBER_ID_PREFIX));
                self.commit("save_member", move |household| {
                    Ok(household.with_member(member.clone()))
                })
                .await
            }
            MemberUpsert::Edit(member) => {
                self.commit("save_member", move |household| {
                    if household.member(&member.id).is_none() {
                        return Err(
                            ValidationError::UnknownId(member.id.clone(), "members").into()
                        );
                    }
                    Ok(household.with_member_updated(member.clone()))
                })
                .await
            }
        }
    }

    /// Creates a goal (saved amount starts at zero) or edits an existing
    /// one. Editing an unknown id is rejected without a write.
    pub async fn save_goal(&self, upsert: GoalUpsert) -> Result<()> {
        match upsert {
            GoalUpsert::Create(input) => {
                let goal = input.into_goal(ids::mint_entity_id(ids::GOAL_ID_PREFIX))?;
                self.commit("save_goal", move |household| {
                    Ok(household.with_goal(goal.clone()))
                })
                .await
            }
            GoalUpsert::Edit(goal) => {
                self.commit("save_goal", move |household| {
                    if household.goal(&goal.id).is_none() {
                        return Err(ValidationError::UnknownId(goal.id.clone(), "goals").into());
                    }
                    Ok(household.with_goal_updated(goal.clone()))
                })
                .await
            }
        }
    }

    /// Registers a payment card. Only the last four digits are accepted or
    /// stored.
    pub async fn add_card(&self, input: NewCard) -> Result<()> {
        let card = input.into_card(ids::mint_entity_id(ids::CARD_ID_PREFIX))?;
        self.commit("add_card", move |household| {
            Ok(household.with_card(card.clone()))
        })
        .await
    }

    pub async fn update_family_profile(&self, profile: FamilyProfile) -> Result<()> {
        self.commit("update_family_profile", move |household| {
            Ok(household.with_profile(profile.clone()))
        })
        .await
    }

    /// Moves a challenge one step forward (accept, then conclude). The
    /// lifecycle has no backward step.
    pub async fn advance_challenge(&self, challenge_id: &str) -> Result<()> {
        let id = challenge_id.to_string();
        self.commit("advance_challenge", move |household| {
            if household.challenge(&id).is_none() {
                return Err(ValidationError::UnknownId(id.clone(), "challenges").into());
            }
            Ok(household.with_challenge_advanced(&id))
        })
        .await
    }

    /// Flips the onboarding flag the first time; later calls never write
    /// again.
    pub async fn mark_onboarding_seen(&self) -> Result<()> {
        let seen = {
            let guard = self.state.read().await;
            guard.as_ref().map(|s| s.household.has_seen_onboarding)
        };
        match seen {
            None => {
                debug!("mark_onboarding_seen: no active session, ignoring");
                Ok(())
            }
            Some(true) => Ok(()),
            Some(false) => {
                self.commit("mark_onboarding_seen", |household| {
                    Ok(household.with_onboarding_seen())
                })
                .await
            }
        }
    }

    // --- Internals ----------------------------------------------------------

    /// Loads the user's household, bootstrapping and persisting the default
    /// shape when none exists, then installs the session. A load failure
    /// leaves the session signed out: a user is never left authenticated
    /// without data.
    async fn establish(&self, user: AuthenticatedUser) -> Result<()> {
        let stored = match self.store.load(&user).await {
            Ok(stored) => stored,
            Err(e) => {
                error!(
                    "Loading household for user {} failed, abandoning sign-in: {}",
                    user.user_id, e
                );
                return Err(e);
            }
        };

        let stored = match stored {
            Some(stored) => stored,
            None => {
                warn!(
                    "No stored household for user {}, creating the default one",
                    user.user_id
                );
                let household =
                    Household::bootstrap(Member::fallback_owner(user.display_name.as_deref()));
                match self.store.create(&user, &household).await {
                    Ok(stored) => stored,
                    // Lost a create race against another device.
                    Err(Error::Store(StoreError::AlreadyExists(_))) => {
                        self.load_existing(&user).await?
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        self.install(user, stored).await;
        Ok(())
    }

    async fn load_existing(&self, user: &AuthenticatedUser) -> Result<StoredHousehold> {
        self.store
            .load(user)
            .await?
            .ok_or_else(|| Error::Store(StoreError::NotFound(user.user_id.clone())))
    }

    async fn install(&self, user: AuthenticatedUser, stored: StoredHousehold) {
        let user_id = user.user_id.clone();
        {
            let mut guard = self.state.write().await;
            *guard = Some(ActiveSession {
                user,
                household: stored.household,
                revision: stored.revision,
            });
        }
        self.events.emit(SessionEvent::signed_in(user_id));
    }

    /// The commit template shared by every mutation.
    ///
    /// `update` must be pure: it is reapplied to a freshly loaded document
    /// after a lost revision race, so minted ids and validated payloads are
    /// built once by the caller and only captured here.
    async fn commit<F>(&self, op: &'static str, update: F) -> Result<()>
    where
        F: Fn(Household) -> Result<Household>,
    {
        let snapshot = {
            let guard = self.state.read().await;
            guard
                .as_ref()
                .map(|s| (s.user.clone(), s.household.clone(), s.revision.clone()))
        };
        let Some((user, mut household, mut revision)) = snapshot else {
            debug!("{}: no active session, ignoring", op);
            return Ok(());
        };

        let mut attempt = 1;
        loop {
            let updated = update(household)?;
            match self.store.replace(&user, &updated, &revision).await {
                Ok(saved) => {
                    if self.adopt(&user.user_id, saved).await {
                        self.events.emit(SessionEvent::HouseholdChanged);
                    } else {
                        debug!("{}: session changed mid-flight, echo discarded", op);
                    }
                    return Ok(());
                }
                Err(Error::Store(StoreError::RevisionConflict(_)))
                    if attempt < MAX_COMMIT_ATTEMPTS =>
                {
                    warn!(
                        "{}: lost revision race (attempt {}), reloading and reapplying",
                        op, attempt
                    );
                    let fresh = self.load_existing(&user).await?;
                    household = fresh.household;
                    revision = fresh.revision;
                    attempt += 1;
                }
                Err(e) => {
                    error!("{} failed: {}", op, e);
                    return Err(e);
                }
            }
        }
    }

    /// Adopts the store's echo, unless the session was torn down or handed
    /// to another user while the write was in flight.
    async fn adopt(&self, user_id: &str, saved: StoredHousehold) -> bool {
        let mut guard = self.state.write().await;
        match guard.as_mut() {
            Some(session) if session.user.user_id == user_id => {
                session.household = saved.household;
                session.revision = saved.revision;
                true
            }
            _ => false,
        }
    }
}
