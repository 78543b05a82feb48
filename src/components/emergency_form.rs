use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::components::view::{self, ViewAction, ViewNode};
use crate::error::{EmergencyError, SUCCESS_MESSAGE};
use crate::models::emergency_models::{
    EmergencyFormProps, EmergencyRequestPayload, FormField, FormState,
};
use crate::utils::api::EmergencyApi;
use crate::utils::auth_token::TokenProvider;
use crate::utils::lifecycle::MountHandle;
use crate::utils::notification::Notifier;
use crate::utils::phone::validate_phone;

pub type CloseCallback = Box<dyn Fn() + Send + Sync>;

/// Clears the loading flag when dropped, including when the submit future
/// itself is dropped mid-request.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Modal form that requests an emergency appointment.
///
/// Visibility and location come from the parent through
/// [`EmergencyFormProps`]; the token provider, backend and notification sink
/// are injected. Each submit emits exactly one notification unless the form
/// is unmounted while the request is in flight.
pub struct EmergencyRequestForm {
    state: Mutex<FormState>,
    props: Mutex<EmergencyFormProps>,
    loading: AtomicBool,
    mount: MountHandle,
    token_provider: Arc<dyn TokenProvider>,
    api: Arc<dyn EmergencyApi>,
    notifier: Arc<dyn Notifier>,
    on_close: CloseCallback,
}

impl EmergencyRequestForm {
    pub fn new(
        props: EmergencyFormProps,
        token_provider: Arc<dyn TokenProvider>,
        api: Arc<dyn EmergencyApi>,
        notifier: Arc<dyn Notifier>,
        on_close: CloseCallback,
    ) -> Self {
        Self {
            state: Mutex::new(FormState::default()),
            props: Mutex::new(props),
            loading: AtomicBool::new(false),
            mount: MountHandle::new(),
            token_provider,
            api,
            notifier,
            on_close,
        }
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current_props(&self) -> MutexGuard<'_, EmergencyFormProps> {
        self.props.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn form_state(&self) -> FormState {
        self.state().clone()
    }

    pub fn props(&self) -> EmergencyFormProps {
        self.current_props().clone()
    }

    /// Called by the parent whenever `is_open`, location or user change.
    pub fn set_props(&self, props: EmergencyFormProps) {
        *self.current_props() = props;
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_mounted()
    }

    /// Abandons any in-flight submission. The form stays inert afterwards.
    pub fn unmount(&self) {
        tracing::debug!("Emergency form unmounted");
        self.mount.unmount();
    }

    /// Updates a field by its input name. Unknown names are ignored.
    pub fn on_field_change(&self, name: &str, value: impl Into<String>) {
        match name.parse::<FormField>() {
            Ok(field) => self.set_field(field, value),
            Err(e) => tracing::debug!("Ignoring change: {}", e),
        }
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        tracing::debug!(field = field.name(), len = value.chars().count(), "Form field changed");
        self.state().set(field, value);
    }

    pub fn render(&self) -> Option<ViewNode> {
        let state = self.form_state();
        let props = self.props();
        view::render(&state, &props, self.is_loading())
    }

    /// Routes an action from the rendered view. `value` is only read for
    /// field changes.
    pub async fn dispatch(&self, action: &ViewAction, value: &str) -> Result<(), EmergencyError> {
        match action {
            ViewAction::FieldChange(field) => {
                self.set_field(*field, value);
                Ok(())
            }
            ViewAction::Close => {
                (self.on_close)();
                Ok(())
            }
            ViewAction::Submit => self.on_submit().await,
        }
    }

    /// Validates the phone number and sends one emergency request.
    ///
    /// `loading` is only advisory: concurrent calls are not rejected. On an
    /// unmounted form this returns `Err(Cancelled)` without validating or
    /// notifying.
    pub async fn on_submit(&self) -> Result<(), EmergencyError> {
        if !self.is_mounted() {
            tracing::debug!("Submit ignored, form no longer mounted");
            return Err(EmergencyError::Cancelled);
        }
        let phone = self.state().phone.clone();
        if let Err(e) = validate_phone(&phone) {
            tracing::warn!("Emergency request not sent: {}", e);
            self.notifier.error(&e.notification_text());
            return Err(e);
        }

        let location = self.current_props().user_location;
        let payload = EmergencyRequestPayload::new(&phone, location.as_ref());

        let loading = LoadingGuard::enter(&self.loading);
        tracing::info!(
            has_location = location.is_some(),
            "Submitting emergency request"
        );
        let mount = self.mount.token();
        let result = tokio::select! {
            biased;
            _ = mount.unmounted() => Err(EmergencyError::Cancelled),
            result = self.send(&payload) => result,
        };
        drop(loading);

        self.finish(result)
    }

    async fn send(&self, payload: &EmergencyRequestPayload) -> Result<(), EmergencyError> {
        let token = self.token_provider.access_token().await?;
        let response = self.api.submit(&token, payload).await?;
        if response.success {
            Ok(())
        } else {
            Err(EmergencyError::Application {
                message: response.message,
            })
        }
    }

    fn finish(&self, result: Result<(), EmergencyError>) -> Result<(), EmergencyError> {
        match result {
            Ok(()) => {
                tracing::info!("Emergency request accepted");
                self.notifier.success(SUCCESS_MESSAGE);
                self.state().reset();
                (self.on_close)();
                Ok(())
            }
            Err(EmergencyError::Cancelled) => {
                tracing::debug!("Emergency request abandoned, form no longer mounted");
                Err(EmergencyError::Cancelled)
            }
            Err(e) => {
                match &e {
                    EmergencyError::Application { .. } => tracing::warn!("{}", e),
                    _ => tracing::error!("Emergency request failed: {}", e),
                }
                self.notifier.error(&e.notification_text());
                Err(e)
            }
        }
    }
}
