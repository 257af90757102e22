use axum::http::StatusCode;
use tracing::{error, info};

use crate::auth::{AuthError, AuthResponse, AuthService, RegisterInput, Role};
use crate::marketplace::catalog::{CatalogError, CatalogService, ServiceCreate, ServiceEntity};
use crate::store::{ServiceStore, SessionStore, StoreError, UserStore};

use super::wizard::RegistrationWizard;

/// What a successful submission produced.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub partner: AuthResponse,
    pub created_services: Vec<ServiceEntity>,
}

/// Turn the finished wizard into a partner account plus its listings.
///
/// Registration happens first, then one service create per draft. There is
/// no rollback: if a service create fails after the account exists, the
/// partial result surfaces as [`RegistrationError::PartialSubmit`] and the
/// wizard snapshot is retained so the partner can resubmit the services.
/// The wizard is cleared on full success only.
pub async fn submit_registration<P, U, T, S>(
    wizard: &RegistrationWizard<P>,
    auth: &AuthService<U, T>,
    catalog: &CatalogService<S>,
) -> Result<SubmitOutcome, RegistrationError>
where
    P: SessionStore + 'static,
    U: UserStore + 'static,
    T: SessionStore + 'static,
    S: ServiceStore + 'static,
{
    for step in 1..=3 {
        if !wizard.can_advance(step) {
            return Err(RegistrationError::StepGate { step });
        }
    }

    let snapshot = wizard.snapshot();
    // can_advance(1) guarantees basic info is present
    let Some(info) = snapshot.basic_info else {
        return Err(RegistrationError::StepGate { step: 1 });
    };

    let partner = auth
        .register(RegisterInput {
            user_name: info.user_name,
            phone_number: info.phone_number,
            role: Role::Partner,
            email: info.email,
            password: info.password,
            bio: None,
        })
        .await?;

    let mut created_services = Vec::new();
    for (category_id, drafts) in &snapshot.services_by_category {
        for draft in drafts {
            let input = ServiceCreate {
                partner_id: partner.user.id.clone(),
                title: draft.title.clone(),
                description: (!draft.description.is_empty())
                    .then(|| draft.description.clone()),
                category_id: category_id.clone(),
                price_type: draft.price_type,
                price: draft.price,
                duration: draft.duration,
                has_offer: draft.has_offer,
                offer_title: draft.offer_title.clone(),
                offer_discount: draft.offer_discount,
                active: true,
                ratings: Vec::new(),
            };
            match catalog.create(input).await {
                Ok(service) => created_services.push(service),
                Err(source) => {
                    error!(
                        partner_id = %partner.user.id,
                        created = created_services.len(),
                        %source,
                        "registration left partially submitted"
                    );
                    return Err(RegistrationError::PartialSubmit {
                        created_services: created_services.len(),
                        source,
                    });
                }
            }
        }
    }

    wizard.reset()?;
    info!(
        partner_id = %partner.user.id,
        services = created_services.len(),
        "partner registration submitted"
    );
    Ok(SubmitOutcome {
        partner,
        created_services,
    })
}

/// Error raised by the wizard and its submission.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("{0}")]
    Validation(String),
    #[error("step {step} is incomplete")]
    StepGate { step: u8 },
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("registered but only {created_services} services were created: {source}")]
    PartialSubmit {
        created_services: usize,
        source: CatalogError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RegistrationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistrationError::Validation(_) | RegistrationError::StepGate { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            RegistrationError::Auth(error) => error.status_code(),
            RegistrationError::PartialSubmit { source, .. } => source.status_code(),
            RegistrationError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            RegistrationError::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            RegistrationError::Store(StoreError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}
