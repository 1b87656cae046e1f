use std::sync::Arc;

use jiff::Timestamp;
use serde_json::Value;
use stackwise_auth::{AuthError, AuthProvider, AuthUser, Session};
use stackwise_core::models::insights::UserInsights;
use stackwise_core::models::product::Product;
use stackwise_core::models::profile::{ProfileInsert, ProfilePatch, UserProfile};
use stackwise_core::tables::{Table, columns, from_row, to_row};
use stackwise_scoring::ScoringStrategy;
use stackwise_storage::{Query, StorageError, TableClient};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::audit::AuditEvent;
use crate::error::StoreError;
use crate::notify::Toasts;
use crate::status::OpState;

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub session: Option<Session>,
    pub profile: Option<UserProfile>,
    pub op: OpState,
}

/// The current user, their session, and their profile row.
///
/// Sign-in and sign-up failures are only reported through `op.error`, for
/// display next to the form; profile failures also raise a toast.
#[derive(Clone)]
pub struct AuthStore {
    provider: Arc<dyn AuthProvider>,
    tables: Arc<dyn TableClient>,
    scoring: Arc<dyn ScoringStrategy>,
    toasts: Toasts,
    state: Arc<Mutex<AuthState>>,
}

impl AuthStore {
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        tables: Arc<dyn TableClient>,
        scoring: Arc<dyn ScoringStrategy>,
        toasts: Toasts,
    ) -> Self {
        Self {
            provider,
            tables,
            scoring,
            toasts,
            state: Arc::default(),
        }
    }

    pub async fn snapshot(&self) -> AuthState {
        self.state.lock().await.clone()
    }

    pub async fn user(&self) -> Option<AuthUser> {
        self.state.lock().await.user.clone()
    }

    pub async fn session(&self) -> Option<Session> {
        self.state.lock().await.session.clone()
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        self.state.lock().await.profile.clone()
    }

    /// Restore a persisted session. An expired access token is refreshed
    /// once; `None` clears the store.
    pub async fn initialize(&self, session: Option<Session>) -> Result<(), StoreError> {
        self.begin().await;

        let Some(session) = session else {
            let mut state = self.state.lock().await;
            state.user = None;
            state.session = None;
            state.profile = None;
            state.op.finish();
            return Ok(());
        };

        match self.restore(session).await {
            Ok((user, session, profile)) => {
                info!(user_id = %user.id, "session restored");
                self.set_signed_in(user, Some(session), profile).await;
                Ok(())
            }
            Err(e) => Err(self.fail_inline(e, "Failed to initialize authentication").await),
        }
    }

    async fn restore(
        &self,
        session: Session,
    ) -> Result<(AuthUser, Session, Option<UserProfile>), StoreError> {
        let (user, session) = match self.provider.get_user(&session.access_token).await {
            Ok(user) => (user, session),
            Err(AuthError::InvalidSession) => {
                let refreshed = self.provider.refresh(&session).await?;
                let user = self.provider.get_user(&refreshed.access_token).await?;
                (user, refreshed)
            }
            Err(e) => return Err(e.into()),
        };
        let profile = self.load_profile(user.id).await?;
        Ok((user, session, profile))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, StoreError> {
        self.begin().await;

        let result = async {
            let session = self.provider.sign_in(email, password).await?;
            let profile = self.load_profile(session.user.id).await?;
            Ok::<_, StoreError>((session, profile))
        }
        .await;

        match result {
            Ok((session, profile)) => {
                let user = session.user.clone();
                self.set_signed_in(user.clone(), Some(session), profile).await;
                Ok(user)
            }
            Err(e) => Err(self.fail_inline(e, "Failed to sign in").await),
        }
    }

    /// Register and create the profile row. The session stays empty while the
    /// account awaits email confirmation.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<AuthUser, StoreError> {
        self.begin().await;

        let result = async {
            let outcome = self.provider.sign_up(email, password, full_name).await?;
            let now = Timestamp::now();
            let insert = ProfileInsert {
                id: outcome.user.id,
                email: outcome.user.email.clone(),
                full_name: full_name.to_string(),
                created_at: now,
                updated_at: now,
            };
            let row = self.tables.insert(Table::UserProfiles, to_row(&insert)?).await?;
            let profile: UserProfile = from_row(row)?;
            Ok::<_, StoreError>((outcome, profile))
        }
        .await;

        match result {
            Ok((outcome, profile)) => {
                let user = outcome.user.clone();
                AuditEvent::new("profile.create", Table::UserProfiles, user.id)
                    .by(user.id)
                    .emit();
                self.set_signed_in(user.clone(), outcome.session, Some(profile))
                    .await;
                Ok(user)
            }
            Err(e) => Err(self.fail_inline(e, "Failed to sign up").await),
        }
    }

    pub async fn sign_out(&self) -> Result<(), StoreError> {
        self.begin().await;

        let session = self.state.lock().await.session.clone();
        let result = match &session {
            Some(session) => self.provider.sign_out(session).await,
            None => Ok(()),
        };

        match result {
            Ok(()) => {
                let mut state = self.state.lock().await;
                if let Some(user) = state.user.take() {
                    info!(user_id = %user.id, "signed out");
                }
                state.session = None;
                state.profile = None;
                state.op.finish();
                Ok(())
            }
            Err(e) => Err(self.fail_inline(e.into(), "Failed to sign out").await),
        }
    }

    /// Persist `patch` on the signed-in user's profile, stamping
    /// `updated_at`, then reload the profile.
    pub async fn update_profile(&self, patch: ProfilePatch) -> Result<UserProfile, StoreError> {
        let user = match self.require_user().await {
            Ok(user) => user,
            Err(e) => return Err(self.fail(e, "Failed to update profile").await),
        };
        self.begin().await;

        match self.patch_profile(user.id, &patch).await {
            Ok(profile) => {
                let mut state = self.state.lock().await;
                state.profile = Some(profile.clone());
                state.op.finish();
                drop(state);

                AuditEvent::new("profile.update", Table::UserProfiles, user.id)
                    .by(user.id)
                    .emit();
                self.toasts.success("Profile updated successfully!");
                Ok(profile)
            }
            Err(e) => Err(self.fail(e, "Failed to update profile").await),
        }
    }

    /// Reload the signed-in user's profile. Without a user this does nothing.
    pub async fn refresh_profile(&self) -> Result<Option<UserProfile>, StoreError> {
        let Some(user) = self.user().await else {
            return Ok(None);
        };
        self.begin().await;

        match self.load_profile(user.id).await {
            Ok(profile) => {
                let mut state = self.state.lock().await;
                state.profile = profile.clone();
                state.op.finish();
                Ok(profile)
            }
            Err(e) => Err(self.fail(e, "Failed to refresh profile").await),
        }
    }

    /// Derive insights from `products` and store them on the profile.
    pub async fn refresh_insights(&self, products: &[Product]) -> Result<UserInsights, StoreError> {
        let user = match self.require_user().await {
            Ok(user) => user,
            Err(e) => return Err(self.fail(e, "Failed to analyze profile").await),
        };
        self.begin().await;

        let result = async {
            let insights = self.scoring.analyze_profile(products).await?;
            let patch = ProfilePatch {
                ai_insights: Some(insights.clone()),
                ..ProfilePatch::default()
            };
            let profile = self.patch_profile(user.id, &patch).await?;
            Ok::<_, StoreError>((insights, profile))
        }
        .await;

        match result {
            Ok((insights, profile)) => {
                let mut state = self.state.lock().await;
                state.profile = Some(profile);
                state.op.finish();
                info!(user_id = %user.id, products = products.len(), "profile insights refreshed");
                Ok(insights)
            }
            Err(e) => Err(self.fail(e, "Failed to analyze profile").await),
        }
    }

    async fn patch_profile(&self, user_id: Uuid, patch: &ProfilePatch) -> Result<UserProfile, StoreError> {
        patch.validate()?;

        let mut row = to_row(patch)?;
        if let Value::Object(fields) = &mut row {
            fields.insert(
                columns::UPDATED_AT.to_string(),
                Value::String(Timestamp::now().to_string()),
            );
        }
        self.tables.update(Table::UserProfiles, user_id, row).await?;

        self.load_profile(user_id)
            .await?
            .ok_or(StoreError::Storage(StorageError::RowNotFound {
                table: Table::UserProfiles,
                id: user_id,
            }))
    }

    async fn load_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, StoreError> {
        let rows = self
            .tables
            .select(Table::UserProfiles, &Query::by_id(user_id))
            .await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(from_row(row)?)),
            None => Ok(None),
        }
    }

    async fn require_user(&self) -> Result<AuthUser, StoreError> {
        self.user().await.ok_or(StoreError::NotAuthenticated)
    }

    async fn set_signed_in(
        &self,
        user: AuthUser,
        session: Option<Session>,
        profile: Option<UserProfile>,
    ) {
        let mut state = self.state.lock().await;
        state.user = Some(user);
        state.session = session;
        state.profile = profile;
        state.op.finish();
    }

    async fn begin(&self) {
        self.state.lock().await.op.begin();
    }

    /// Record a failure for display next to the form, without a toast.
    async fn fail_inline(&self, err: StoreError, context: &str) -> StoreError {
        warn!(error = %err, "{context}");
        self.state.lock().await.op.fail(err.to_string());
        err
    }

    async fn fail(&self, err: StoreError, toast: &str) -> StoreError {
        let err = self.fail_inline(err, toast).await;
        self.toasts.error(toast);
        err
    }
}
