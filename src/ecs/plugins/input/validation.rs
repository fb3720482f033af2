use crate::ecs::plugins::input::setup::InputSetup;
use crate::ecs::plugins::input::settings::InputSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid,
}

/// Findings collected while validating a setup descriptor.
#[derive(Debug, Default)]
pub struct ValidationReport {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationReport {
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Checks a setup descriptor for the mistakes that would make registration
/// pointless or surprising: contexts without mappings, empty handler lists,
/// handlers with no actions or trigger events, and (when matching is on)
/// context actions no handler responds to, plus handlers watching actions the
/// context never maps.
pub fn validate_setup(setup: &InputSetup, settings: &InputSettings) -> ValidationReport {
    let mut report = ValidationReport::default();

    let has_context = !setup.context().mappings().is_empty();
    if !has_context {
        report.add_error(format!(
            "mapping context '{}' has no key mappings",
            setup.context().id()
        ));
    }

    let has_handlers = !setup.handlers().is_empty();
    if !has_handlers {
        report.add_error("no input handlers provided");
    }

    let match_handlers = settings.enable_data_validation && settings.match_handlers_with_context;
    if has_context && has_handlers && match_handlers {
        let context_actions = setup.context().unique_actions();
        let mut unmatched = context_actions.clone();

        for handler in setup.handlers() {
            if handler.actions().is_empty() {
                report.add_error(format!(
                    "no actions assigned to handler '{}'",
                    handler.name()
                ));
            } else {
                unmatched.retain(|action| !handler.actions().contains(action));

                for action in handler.actions() {
                    if !context_actions.contains(action) {
                        report.add_warning(format!(
                            "handler '{}' watches action '{}', which context '{}' never maps",
                            handler.name(),
                            action,
                            setup.context().id()
                        ));
                    }
                }
            }

            if handler.trigger_events().is_empty() {
                report.add_error(format!(
                    "no trigger events assigned to handler '{}'",
                    handler.name()
                ));
            }
        }

        for action in unmatched {
            report.add_error(format!("no input handlers for action '{action}'"));
        }
    }

    report
}

/// Collapses a report into a verdict. `&&` binds tighter than `||` here, so
/// any warning makes the setup invalid even while `enable_data_validation`
/// is off; only errors are gated by the flag.
pub fn determine_result(report: &ValidationReport, settings: &InputSettings) -> ValidationOutcome {
    if settings.enable_data_validation && !report.errors().is_empty()
        || !report.warnings().is_empty()
    {
        return ValidationOutcome::Invalid;
    }

    ValidationOutcome::Valid
}
