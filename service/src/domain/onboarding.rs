//! Tenant onboarding wizard state.

use common::Money;
use derive_more::{Display, Error};

use crate::domain::{lease, property, space, tenant};
#[cfg(doc)]
use crate::domain::{Lease, Property, Space, Tenant};

/// Validated tenant identity collected on the first wizard step.
#[derive(Clone, Debug)]
pub struct TenantInfo {
    /// Business partner code of the [`Tenant`], if assigned.
    pub bp_code: Option<tenant::BpCode>,

    /// First name of the [`Tenant`].
    pub first_name: tenant::FirstName,

    /// Last name of the [`Tenant`].
    pub last_name: tenant::LastName,

    /// Email of the [`Tenant`], if any.
    pub email: Option<tenant::Email>,

    /// Contact number of the [`Tenant`], if any.
    pub contact_no: Option<tenant::ContactNo>,

    /// Postal address of the [`Tenant`].
    pub address: tenant::Address,

    /// Company name the [`Tenant`] operates under, if any.
    pub company_name: Option<tenant::CompanyName>,
}

/// Validated lease terms collected on the second wizard step.
#[derive(Clone, Debug)]
pub struct LeaseTerms {
    /// ID of the [`Property`] the leased [`Space`] belongs to.
    pub property_id: property::Id,

    /// ID of the [`Space`] being leased.
    pub space_id: space::Id,

    /// Monthly rent of the [`Lease`].
    pub monthly_rent: Money,

    /// Commencement of the [`Lease`] term.
    pub starts_at: lease::CommencementDateTime,

    /// Expiration of the [`Lease`] term.
    pub expires_at: lease::ExpirationDateTime,

    /// Security deposit, if agreed.
    pub security_deposit: Option<Money>,

    /// Utility deposit, if agreed.
    pub utility_deposit: Option<Money>,

    /// Special conditions of the [`Lease`], if any.
    pub special_conditions: Option<lease::SpecialConditions>,
}

/// Input advancing a [`Wizard`] by one step.
#[derive(Clone, Debug)]
pub enum StepInput {
    /// Tenant identity for the first step.
    Tenant(TenantInfo),

    /// Lease terms for the second step.
    Terms(LeaseTerms),
}

/// Tenant onboarding wizard.
///
/// Each state carries everything entered so far, so navigating backwards
/// and forwards never loses field values. Only the step being left is
/// validated on advancing.
#[derive(Clone, Debug)]
pub enum Wizard {
    /// First step: collecting tenant identity.
    TenantInfo {
        /// Identity kept from an earlier pass over this step, if any.
        tenant: Option<TenantInfo>,

        /// Terms kept from an earlier pass over the second step, if any.
        terms: Option<LeaseTerms>,
    },

    /// Second step: collecting lease terms.
    LeaseTerms {
        /// Identity collected on the first step.
        tenant: TenantInfo,

        /// Terms kept from an earlier pass over this step, if any.
        terms: Option<LeaseTerms>,
    },

    /// Final step: reviewing the full payload before submission.
    Confirmation {
        /// Identity collected on the first step.
        tenant: TenantInfo,

        /// Terms collected on the second step.
        terms: LeaseTerms,
    },
}

impl Wizard {
    /// Creates a new [`Wizard`] at its first step with no values entered.
    #[must_use]
    pub fn new() -> Self {
        Self::TenantInfo {
            tenant: None,
            terms: None,
        }
    }

    /// Advances this [`Wizard`] by one step with the provided [`StepInput`].
    ///
    /// # Errors
    ///
    /// If the [`StepInput`] doesn't match the current step.
    pub fn advance(self, input: StepInput) -> Result<Self, InvalidStepError> {
        match (self, input) {
            (Self::TenantInfo { terms, .. }, StepInput::Tenant(tenant)) => {
                Ok(Self::LeaseTerms { tenant, terms })
            }
            (Self::LeaseTerms { tenant, .. }, StepInput::Terms(terms)) => {
                Ok(Self::Confirmation { tenant, terms })
            }
            (wizard, _) => Err(InvalidStepError {
                wizard: Box::new(wizard),
            }),
        }
    }

    /// Navigates this [`Wizard`] one step back, keeping every entered value.
    ///
    /// Going back from the first step is a no-op.
    #[must_use]
    pub fn back(self) -> Self {
        match self {
            Self::TenantInfo { .. } => self,
            Self::LeaseTerms { tenant, terms } => Self::TenantInfo {
                tenant: Some(tenant),
                terms,
            },
            Self::Confirmation { tenant, terms } => Self::LeaseTerms {
                tenant,
                terms: Some(terms),
            },
        }
    }

    /// Finishes this [`Wizard`], yielding the full validated payload.
    ///
    /// # Errors
    ///
    /// If this [`Wizard`] hasn't reached its final step yet, returning it
    /// unchanged.
    pub fn finish(self) -> Result<(TenantInfo, LeaseTerms), Box<Self>> {
        match self {
            Self::Confirmation { tenant, terms } => Ok((tenant, terms)),
            wizard @ (Self::TenantInfo { .. } | Self::LeaseTerms { .. }) => {
                Err(Box::new(wizard))
            }
        }
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

/// Error of advancing a [`Wizard`] with a [`StepInput`] not matching its
/// current step.
#[derive(Debug, Display, Error)]
#[display("step input doesn't match the current wizard step")]
pub struct InvalidStepError {
    /// [`Wizard`] left unchanged by the failed transition.
    #[error(not(source))]
    pub wizard: Box<Wizard>,
}

#[cfg(test)]
mod spec {
    use common::{Currency, DateTime, Money};

    use super::{LeaseTerms, StepInput, TenantInfo, Wizard};
    use crate::domain::{property, space, tenant};

    fn tenant_info(first_name: &str) -> TenantInfo {
        TenantInfo {
            bp_code: None,
            first_name: tenant::FirstName::new(first_name).unwrap(),
            last_name: tenant::LastName::new("Dela Cruz").unwrap(),
            email: None,
            contact_no: None,
            address: tenant::Address::new("123 Rizal Ave, Manila").unwrap(),
            company_name: None,
        }
    }

    fn lease_terms() -> LeaseTerms {
        LeaseTerms {
            property_id: property::Id::new(),
            space_id: space::Id::new(),
            monthly_rent: Money {
                amount: "10000".parse().unwrap(),
                currency: Currency::Php,
            },
            starts_at: DateTime::from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .coerce(),
            expires_at: DateTime::from_rfc3339("2025-01-01T00:00:00Z")
                .unwrap()
                .coerce(),
            security_deposit: None,
            utility_deposit: None,
            special_conditions: None,
        }
    }

    #[test]
    fn advances_through_all_steps() {
        let wizard = Wizard::new()
            .advance(StepInput::Tenant(tenant_info("Juan")))
            .unwrap()
            .advance(StepInput::Terms(lease_terms()))
            .unwrap();

        let (tenant, _) = wizard.finish().unwrap();
        assert_eq!(AsRef::<str>::as_ref(&tenant.first_name), "Juan");
    }

    #[test]
    fn rejects_out_of_order_input() {
        assert!(Wizard::new()
            .advance(StepInput::Terms(lease_terms()))
            .is_err());
    }

    #[test]
    fn back_preserves_entered_values() {
        let wizard = Wizard::new()
            .advance(StepInput::Tenant(tenant_info("Juan")))
            .unwrap()
            .advance(StepInput::Terms(lease_terms()))
            .unwrap()
            .back()
            .back();

        let Wizard::TenantInfo { tenant, terms } = wizard else {
            panic!("expected the first step");
        };
        assert_eq!(AsRef::<str>::as_ref(&tenant.unwrap().first_name), "Juan");
        assert!(terms.is_some());
    }

    #[test]
    fn cannot_finish_early() {
        assert!(Wizard::new()
            .advance(StepInput::Tenant(tenant_info("Juan")))
            .unwrap()
            .finish()
            .is_err());
    }
}
