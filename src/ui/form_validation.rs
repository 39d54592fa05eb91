use crate::core::ClassList;

pub const WAS_VALIDATED: &str = "was-validated";

/// `.needs-validation` form
pub trait ValidatableForm: ClassList {
    /// Native constraint validation.
    fn check_validity(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    Proceed,
    /// Caller must prevent the default action and stop propagation.
    Block,
}

pub fn on_submit<F: ValidatableForm + ?Sized>(form: &F) -> SubmitDecision {
    let decision = if form.check_validity() {
        SubmitDecision::Proceed
    } else {
        tracing::debug!("Form submit blocked by validation");
        SubmitDecision::Block
    };
    form.add_class(WAS_VALIDATED);
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryElement;

    struct Form {
        valid: bool,
        element: InMemoryElement,
    }

    impl ClassList for Form {
        fn add_class(&self, class: &str) {
            self.element.add_class(class)
        }
        fn remove_class(&self, class: &str) {
            self.element.remove_class(class)
        }
        fn toggle_class(&self, class: &str) -> bool {
            self.element.toggle_class(class)
        }
        fn has_class(&self, class: &str) -> bool {
            self.element.has_class(class)
        }
    }

    impl ValidatableForm for Form {
        fn check_validity(&self) -> bool {
            self.valid
        }
    }

    #[test]
    fn test_invalid_form_is_blocked_and_marked() {
        let form = Form {
            valid: false,
            element: InMemoryElement::with_classes(&["needs-validation"]),
        };
        assert_eq!(on_submit(&form), SubmitDecision::Block);
        assert!(form.has_class(WAS_VALIDATED));
    }

    #[test]
    fn test_valid_form_proceeds_and_is_marked() {
        let form = Form {
            valid: true,
            element: InMemoryElement::new(),
        };
        assert_eq!(on_submit(&form), SubmitDecision::Proceed);
        assert!(form.has_class(WAS_VALIDATED));
    }
}
