//! Webhook creation form
//!
//! State machine behind the "Create Webhook" page:
//!
//! ```text
//! Idle -> NamespaceSelected -> AllFieldsValid -> Submitting -> Success | Failure
//! ```
//!
//! Selecting a namespace resets the pipeline, secret and service account
//! lists and selections, and hands out a new [`Generation`]. The caller
//! fetches the three lists for that namespace and feeds the responses back
//! tagged with the generation; responses for an older namespace selection
//! are dropped.
//!
//! REST failures are passed in as the server's error text and surface as a
//! single notification banner.

use crate::domain::notification::Notification;
use crate::dto::webhook::CreateSecret;
use crate::dto::webhook::CreateWebhook;
use crate::error::ValidationError;
use crate::store::Generation;
use crate::webhook::validation::validate_name;

/// Phase of the create form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    NamespaceSelected,
    AllFieldsValid,
    Submitting,
    Success,
    Failure,
}

/// Form fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Repository,
    Namespace,
    Pipeline,
    GitSecret,
    ServiceAccount,
    DockerRegistry,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::Name,
        FormField::Repository,
        FormField::Namespace,
        FormField::Pipeline,
        FormField::GitSecret,
        FormField::ServiceAccount,
        FormField::DockerRegistry,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Repository => "repository URL",
            FormField::Namespace => "namespace",
            FormField::Pipeline => "pipeline",
            FormField::GitSecret => "access token secret",
            FormField::ServiceAccount => "service account",
            FormField::DockerRegistry => "docker registry",
        }
    }
}

/// Dropdown lists scoped to the selected namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopedList {
    Pipelines,
    Secrets,
    ServiceAccounts,
}

/// A dropdown's backing list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionList {
    items: Option<Vec<String>>,
    failed: bool,
}

impl OptionList {
    /// Items once loaded; `None` renders a loading skeleton
    pub fn items(&self) -> Option<&[String]> {
        self.items.as_deref()
    }

    /// A fetch failed; no further attempts are made
    pub fn failed(&self) -> bool {
        self.failed
    }

    fn reset(&mut self) {
        self.items = None;
    }

    fn apply(&mut self, result: Result<Vec<String>, String>) -> Option<String> {
        match result {
            Ok(items) => {
                self.items = Some(items);
                None
            }
            Err(text) => {
                self.failed = true;
                Some(text)
            }
        }
    }
}

/// Fetches to issue after a namespace was selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceScope {
    pub namespace: String,
    pub generation: Generation,
    pub fetch_pipelines: bool,
    pub fetch_secrets: bool,
    pub fetch_service_accounts: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Submission {
    #[default]
    Editing,
    Submitting,
    Succeeded,
    Failed,
}

/// State of the webhook create page
#[derive(Debug, Clone, Default)]
pub struct WebhookForm {
    name: String,
    repository: String,
    namespace: String,
    pipeline: String,
    git_secret: String,
    service_account: String,
    docker_registry: String,

    namespaces: OptionList,
    pipelines: OptionList,
    secrets: OptionList,
    service_accounts: OptionList,

    generation: Generation,
    submission: Submission,

    show_delete_dialog: bool,
    show_create_dialog: bool,
    new_secret_name: String,
    new_secret_token: String,

    notification: Option<Notification>,
}

impl WebhookForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        match self.submission {
            Submission::Submitting => FormPhase::Submitting,
            Submission::Succeeded => FormPhase::Success,
            Submission::Failed => FormPhase::Failure,
            Submission::Editing if self.can_submit() => FormPhase::AllFieldsValid,
            Submission::Editing if !self.namespace.is_empty() => FormPhase::NamespaceSelected,
            Submission::Editing => FormPhase::Idle,
        }
    }

    // =========================================================================
    // Fields
    // =========================================================================

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Repository => &self.repository,
            FormField::Namespace => &self.namespace,
            FormField::Pipeline => &self.pipeline,
            FormField::GitSecret => &self.git_secret,
            FormField::ServiceAccount => &self.service_account,
            FormField::DockerRegistry => &self.docker_registry,
        }
    }

    /// Set a text field or dropdown selection
    ///
    /// Namespace changes go through [`WebhookForm::select_namespace`] so the
    /// scoped lists get reset; setting it here does the same and discards the
    /// returned scope.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        self.touch();
        match field {
            FormField::Name => self.name = value,
            FormField::Repository => self.repository = value,
            FormField::Namespace => {
                self.select_namespace(value);
            }
            FormField::Pipeline => self.pipeline = value,
            FormField::GitSecret => self.git_secret = value,
            FormField::ServiceAccount => self.service_account = value,
            FormField::DockerRegistry => self.docker_registry = value,
        }
    }

    /// Editing after a failed submit returns the form to its editable phases
    fn touch(&mut self) {
        if self.submission == Submission::Failed {
            self.submission = Submission::Editing;
        }
    }

    /// Scoped dropdowns stay disabled until a namespace is chosen
    pub fn scoped_dropdowns_enabled(&self) -> bool {
        !self.namespace.is_empty()
    }

    /// Select a namespace, resetting everything scoped to the previous one
    ///
    /// Returns the fetches to issue, or `None` when the namespace was cleared.
    /// Lists whose fetch failed earlier are not re-requested.
    pub fn select_namespace(&mut self, namespace: impl Into<String>) -> Option<NamespaceScope> {
        self.touch();
        self.namespace = namespace.into();
        self.pipeline.clear();
        self.git_secret.clear();
        self.service_account.clear();
        self.pipelines.reset();
        self.secrets.reset();
        self.service_accounts.reset();
        self.generation = self.generation.next();

        if self.namespace.is_empty() {
            return None;
        }

        tracing::debug!(
            "Namespace {} selected (generation {:?})",
            self.namespace,
            self.generation
        );

        Some(NamespaceScope {
            namespace: self.namespace.clone(),
            generation: self.generation,
            fetch_pipelines: !self.pipelines.failed(),
            fetch_secrets: !self.secrets.failed(),
            fetch_service_accounts: !self.service_accounts.failed(),
        })
    }

    // =========================================================================
    // Fetched lists
    // =========================================================================

    pub fn namespaces(&self) -> &OptionList {
        &self.namespaces
    }

    pub fn list(&self, list: ScopedList) -> &OptionList {
        match list {
            ScopedList::Pipelines => &self.pipelines,
            ScopedList::Secrets => &self.secrets,
            ScopedList::ServiceAccounts => &self.service_accounts,
        }
    }

    /// Whether the namespace list should be (re-)requested
    pub fn needs_namespaces(&self) -> bool {
        self.namespaces.items().is_none() && !self.namespaces.failed()
    }

    pub fn namespaces_loaded(&mut self, result: Result<Vec<String>, String>) {
        if let Some(text) = self.namespaces.apply(result) {
            self.notification = Some(Notification::request_failed("get namespaces", &text));
        }
    }

    /// Apply a scoped list response
    ///
    /// Returns `false` if the response belongs to an earlier namespace
    /// selection and was dropped.
    pub fn list_loaded(
        &mut self,
        list: ScopedList,
        generation: Generation,
        result: Result<Vec<String>, String>,
    ) -> bool {
        if generation != self.generation {
            tracing::warn!(
                "Dropping stale {:?} response (generation {:?}, current {:?})",
                list,
                generation,
                self.generation
            );
            return false;
        }

        let (target, action) = match list {
            ScopedList::Pipelines => (&mut self.pipelines, "get pipelines"),
            ScopedList::Secrets => (&mut self.secrets, "get secrets"),
            ScopedList::ServiceAccounts => (&mut self.service_accounts, "get service accounts"),
        };

        if let Some(text) = target.apply(result) {
            self.notification = Some(Notification::request_failed(action, &text));
        }
        true
    }

    // =========================================================================
    // Submission
    // =========================================================================

    /// Every blocking field error, in field order
    pub fn errors(&self) -> Vec<(FormField, ValidationError)> {
        let mut errors = Vec::new();
        for field in FormField::ALL {
            let value = self.value(field);
            if value.is_empty() {
                errors.push((field, ValidationError::Required(field.label())));
            } else if field == FormField::Name {
                if let Err(e) = validate_name(value) {
                    errors.push((field, e));
                }
            }
        }
        errors
    }

    /// Whether the create button is enabled
    pub fn can_submit(&self) -> bool {
        matches!(self.submission, Submission::Editing | Submission::Failed)
            && self.errors().is_empty()
    }

    /// Compose the create request and enter `Submitting`
    pub fn begin_submit(&mut self) -> Result<CreateWebhook, ValidationError> {
        match self.submission {
            Submission::Submitting => return Err(ValidationError::InProgress),
            Submission::Succeeded => return Err(ValidationError::AlreadySubmitted),
            Submission::Editing | Submission::Failed => {}
        }
        if let Some((_, error)) = self.errors().into_iter().next() {
            return Err(error);
        }

        self.submission = Submission::Submitting;
        self.notification = None;

        Ok(CreateWebhook {
            name: self.name.clone(),
            git_repository_url: self.repository.clone(),
            access_token: self.git_secret.clone(),
            pipeline: self.pipeline.clone(),
            namespace: self.namespace.clone(),
            service_account: self.service_account.clone(),
            docker_registry: self.docker_registry.clone(),
        })
    }

    /// Record the outcome of the create request
    ///
    /// On success the caller returns to the table and shows the
    /// "created" banner there; on failure the form stays editable.
    pub fn finish_submit(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => {
                tracing::info!("Webhook {} created", self.name);
                self.submission = Submission::Succeeded;
            }
            Err(text) => {
                self.submission = Submission::Failed;
                self.notification = Some(Notification::request_failed("create webhook", &text));
            }
        }
    }

    // =========================================================================
    // Secret management
    // =========================================================================

    pub fn delete_dialog_open(&self) -> bool {
        self.show_delete_dialog
    }

    pub fn create_dialog_open(&self) -> bool {
        self.show_create_dialog
    }

    /// Open the delete confirmation for the selected secret
    ///
    /// With no secret selected an error banner is shown instead and `false`
    /// is returned.
    pub fn request_delete_secret(&mut self) -> bool {
        if self.git_secret.is_empty() {
            self.notification = Some(Notification::error(
                "No secret selected. A secret must be selected from the drop down before selecting delete.",
            ));
            return false;
        }
        self.show_delete_dialog = true;
        self.notification = None;
        true
    }

    pub fn cancel_delete_secret(&mut self) {
        self.show_delete_dialog = false;
    }

    /// Confirm the dialog; returns `(secret, namespace)` to delete
    pub fn confirm_delete_secret(&mut self) -> Option<(String, String)> {
        if !self.show_delete_dialog || self.git_secret.is_empty() {
            return None;
        }
        self.show_delete_dialog = false;
        Some((self.git_secret.clone(), self.namespace.clone()))
    }

    /// Record the outcome of a secret deletion
    pub fn finish_delete_secret(&mut self, secret: &str, result: Result<(), String>) {
        match result {
            Ok(()) => {
                if let Some(items) = self.secrets.items.as_mut() {
                    items.retain(|s| s != secret);
                }
                if self.git_secret == secret {
                    self.git_secret.clear();
                }
                self.notification = Some(Notification::success("Secret deleted."));
            }
            Err(text) => {
                self.notification = Some(Notification::request_failed("delete secret", &text));
            }
        }
    }

    pub fn toggle_create_secret_dialog(&mut self) {
        self.notification = None;
        self.show_create_dialog = !self.show_create_dialog;
    }

    pub fn set_new_secret(&mut self, name: impl Into<String>, token: impl Into<String>) {
        self.new_secret_name = name.into();
        self.new_secret_token = token.into();
    }

    /// Create is enabled once both name and token are filled in
    pub fn can_create_secret(&self) -> bool {
        !self.new_secret_name.is_empty() && !self.new_secret_token.is_empty()
    }

    pub fn begin_create_secret(&mut self) -> Option<(CreateSecret, String)> {
        if !self.can_create_secret() || self.namespace.is_empty() {
            return None;
        }
        Some((
            CreateSecret {
                name: self.new_secret_name.clone(),
                access_token: self.new_secret_token.clone(),
            },
            self.namespace.clone(),
        ))
    }

    /// Record the outcome of a secret creation; success selects the new secret
    pub fn finish_create_secret(&mut self, result: Result<(), String>) {
        let name = std::mem::take(&mut self.new_secret_name);
        self.new_secret_token.clear();
        self.show_create_dialog = false;

        match result {
            Ok(()) => {
                if let Some(items) = self.secrets.items.as_mut() {
                    if !items.contains(&name) {
                        items.push(name.clone());
                    }
                }
                self.git_secret = name;
                self.notification = Some(Notification::success("Secret created."));
            }
            Err(text) => {
                self.notification = Some(Notification::request_failed("create secret", &text));
            }
        }
    }

    // =========================================================================
    // Notification
    // =========================================================================

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}
