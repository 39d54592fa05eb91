use crate::core::{ClassList, Document};

pub const HIDDEN: &str = "d-none";

/// Blocking yes/no prompt (`window.confirm`).
pub trait Prompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

pub fn delete_prompt(kind: &str, name: &str) -> String {
    format!("Are you sure you want to delete {}: {}?", kind, name)
}

pub fn confirm_delete<P: Prompt + ?Sized>(prompt: &P, kind: &str, name: &str) -> bool {
    prompt.confirm(&delete_prompt(kind, name))
}

/// 切換區塊顯示；找不到元素時不做事。回傳切換後是否隱藏
pub fn toggle_section<D: Document + ?Sized>(document: &D, section_id: &str) -> Option<bool> {
    let section = document.element(section_id)?;
    Some(section.toggle_class(HIDDEN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryDocument, InMemoryElement};
    use std::sync::Mutex;

    struct RecordingPrompt {
        answer: bool,
        asked: Mutex<Vec<String>>,
    }

    impl Prompt for RecordingPrompt {
        fn confirm(&self, message: &str) -> bool {
            self.asked.lock().unwrap().push(message.to_string());
            self.answer
        }
    }

    #[test]
    fn test_confirm_delete_message_and_answer() {
        let prompt = RecordingPrompt {
            answer: false,
            asked: Mutex::new(Vec::new()),
        };

        assert!(!confirm_delete(&prompt, "helper", "Lakshmi"));
        assert_eq!(
            prompt.asked.lock().unwrap()[0],
            "Are you sure you want to delete helper: Lakshmi?"
        );
    }

    #[test]
    fn test_toggle_section() {
        let mut document = InMemoryDocument::new();
        let section = document.insert("contract-details", InMemoryElement::new());

        assert_eq!(toggle_section(&document, "contract-details"), Some(true));
        assert!(section.has_class(HIDDEN));
        assert_eq!(toggle_section(&document, "contract-details"), Some(false));
        assert!(!section.has_class(HIDDEN));
        assert_eq!(toggle_section(&document, "missing"), None);
    }
}
