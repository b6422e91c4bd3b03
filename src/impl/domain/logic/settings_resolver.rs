use crate::entities::Settings;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub settings: Settings,
    /// Whether the resolved value differs from what is stored.
    pub needs_save: bool,
}

/// Turns the stored settings slot into usable settings.
///
/// Missing settings resolve to zero defaults. Wallet linking is switched off
/// (and the template cleared) whenever the wallet module is unavailable.
pub fn resolve_settings(stored: Option<Settings>, wallet_available: bool) -> ResolvedSettings {
    let (settings, missing) = match stored {
        Some(s) => (s, false),
        None => (Settings::default(), true),
    };

    if !wallet_available && (settings.link_with_wallet || settings.wallet_template_id.is_some()) {
        return ResolvedSettings {
            settings: Settings {
                link_with_wallet: false,
                wallet_template_id: None,
                ..settings
            },
            needs_save: true,
        };
    }

    ResolvedSettings {
        settings,
        needs_save: missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::WalletTemplateId;

    fn linked_settings() -> Settings {
        Settings {
            initial_prepayment: 250.0,
            link_with_wallet: true,
            wallet_template_id: Some(WalletTemplateId::new("tpl")),
            ..Default::default()
        }
    }

    #[test]
    fn missing_settings_resolve_to_defaults() {
        let resolved = resolve_settings(None, true);
        assert_eq!(resolved.settings, Settings::default());
        assert!(resolved.needs_save);
    }

    #[test]
    fn wallet_is_disabled_when_module_unavailable() {
        let resolved = resolve_settings(Some(linked_settings()), false);
        assert!(!resolved.settings.link_with_wallet);
        assert_eq!(resolved.settings.wallet_template_id, None);
        assert_eq!(resolved.settings.initial_prepayment, 250.0);
        assert!(resolved.needs_save);
    }

    #[test]
    fn stored_settings_pass_through_when_wallet_available() {
        let resolved = resolve_settings(Some(linked_settings()), true);
        assert_eq!(resolved.settings, linked_settings());
        assert!(!resolved.needs_save);
    }
}
