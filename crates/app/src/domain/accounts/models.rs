//! Account Models

use crate::domain::accounts::records::{AccountRecord, AccountUuid, Role};

/// Why an account may not purchase right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseDenial {
    /// A seller who has not enabled customer mode.
    SellerModeDisabled,

    /// Any other role that is not a customer.
    NotCustomer,
}

impl PurchaseDenial {
    /// Localised reason shown to the user. The two texts drive different
    /// prompts in the storefront.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::SellerModeDisabled => {
                "Продавцы должны включить функциональность покупателя, чтобы совершать покупки"
            }
            Self::NotCustomer => "Только покупатели могут совершать покупки",
        }
    }
}

/// Resolved rights of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    pub account: AccountUuid,
    pub role: Role,
    pub can_purchase: bool,
    pub can_sell: bool,
    pub description: &'static str,
}

impl Eligibility {
    #[must_use]
    pub fn for_account(account: &AccountRecord) -> Self {
        let can_purchase = match account.role {
            Role::Customer => true,
            Role::Seller => account.customer_mode_enabled,
            Role::Admin => false,
        };

        let description = match (account.role, can_purchase) {
            (Role::Customer, _) => "Покупатель: может добавлять товары в корзину и оформлять заказы",
            (Role::Seller, true) => "Продавец с включённой функциональностью покупателя",
            (Role::Seller, false) => "Продавец: функциональность покупателя отключена",
            (Role::Admin, _) => "Администратор: управляет ролями и не совершает покупки",
        };

        Self {
            account: account.uuid,
            role: account.role,
            can_purchase,
            can_sell: matches!(account.role, Role::Seller | Role::Admin),
            description,
        }
    }

    /// The reason purchasing is refused, if it is.
    #[must_use]
    pub fn purchase_denial(&self) -> Option<PurchaseDenial> {
        if self.can_purchase {
            return None;
        }

        Some(match self.role {
            Role::Seller => PurchaseDenial::SellerModeDisabled,
            Role::Customer | Role::Admin => PurchaseDenial::NotCustomer,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    fn account(role: Role, customer_mode_enabled: bool) -> AccountRecord {
        let mut account = AccountRecord::new(AccountUuid::new(), role, Timestamp::UNIX_EPOCH);

        account.customer_mode_enabled = customer_mode_enabled;

        account
    }

    #[test]
    fn customers_can_purchase_but_not_sell() {
        let eligibility = Eligibility::for_account(&account(Role::Customer, false));

        assert!(eligibility.can_purchase);
        assert!(!eligibility.can_sell);
        assert_eq!(eligibility.purchase_denial(), None);
    }

    #[test]
    fn sellers_need_customer_mode_to_purchase() {
        let disabled = Eligibility::for_account(&account(Role::Seller, false));
        let enabled = Eligibility::for_account(&account(Role::Seller, true));

        assert!(!disabled.can_purchase);
        assert!(disabled.can_sell);
        assert_eq!(
            disabled.purchase_denial(),
            Some(PurchaseDenial::SellerModeDisabled)
        );

        assert!(enabled.can_purchase);
        assert!(enabled.can_sell);
        assert_eq!(enabled.purchase_denial(), None);
    }

    #[test]
    fn admins_sell_but_never_purchase() {
        let eligibility = Eligibility::for_account(&account(Role::Admin, true));

        assert!(!eligibility.can_purchase);
        assert!(eligibility.can_sell);
        assert_eq!(
            eligibility.purchase_denial(),
            Some(PurchaseDenial::NotCustomer)
        );
    }

    #[test]
    fn denial_messages_differ() {
        assert!(
            PurchaseDenial::SellerModeDisabled
                .message()
                .starts_with("Продавцы должны включить функциональность покупателя")
        );
        assert_ne!(
            PurchaseDenial::SellerModeDisabled.message(),
            PurchaseDenial::NotCustomer.message()
        );
    }
}
