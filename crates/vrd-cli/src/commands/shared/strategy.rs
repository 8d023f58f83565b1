use vrd_core::enums::Strategy;

/// Strategy named on the command line, or the configured default.
///
/// Unknown names are passed through to the backend as custom strategies, with
/// a warning in case of a typo.
pub fn resolve_strategy(flag: Option<&str>, configured: Strategy) -> Strategy {
    let Some(name) = flag else {
        return configured;
    };
    let strategy = Strategy::from(name.trim());
    if let Strategy::Custom(name) = &strategy {
        tracing::warn!(strategy = %name, "unknown strategy, sending it to the backend as-is");
    }
    strategy
}

#[cfg(test)]
mod tests {
    use vrd_core::enums::Strategy;

    use super::resolve_strategy;

    #[test]
    fn flag_overrides_configured_strategy() {
        assert_eq!(
            resolve_strategy(Some("rule-based"), Strategy::FastToG),
            Strategy::RuleBased
        );
        assert_eq!(resolve_strategy(None, Strategy::FastToG), Strategy::FastToG);
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(
            resolve_strategy(Some("graph-rag"), Strategy::FastToG),
            Strategy::Custom("graph-rag".to_string())
        );
    }
}
