use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

pub type ChangeListener = Box<dyn Fn(&str, bool) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelectOptions {
    pub include_select_all: bool,
    pub non_selected_text: String,
}

impl Default for MultiSelectOptions {
    fn default() -> Self {
        Self {
            include_select_all: true,
            non_selected_text: "Select Tasks".to_string(),
        }
    }
}

/// Third-party multiselect widget bound to `#tasks`.
pub trait MultiSelectWidget: Send + Sync {
    fn init(&self, options: &MultiSelectOptions);
    /// Registers a listener called with `(option value, checked)`.
    fn on_change(&self, listener: ChangeListener);
}

/// 合約頁面已勾選的工作
#[derive(Debug, Clone, Default)]
pub struct TaskSelection {
    selected: Arc<Mutex<BTreeSet<String>>>,
}

impl TaskSelection {
    pub fn update(&self, task_id: &str, checked: bool) {
        let Ok(mut selected) = self.selected.lock() else {
            tracing::warn!("Task selection lock poisoned; ignoring change for '{}'", task_id);
            return;
        };
        if checked {
            selected.insert(task_id.to_string());
        } else {
            selected.remove(task_id);
        }
    }

    pub fn selected(&self) -> Vec<String> {
        self.selected
            .lock()
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.selected
            .lock()
            .map(|s| s.contains(task_id))
            .unwrap_or(false)
    }
}

pub fn attach_task_selector<W: MultiSelectWidget + ?Sized>(widget: &W) -> TaskSelection {
    let selection = TaskSelection::default();
    widget.init(&MultiSelectOptions::default());

    let tracker = selection.clone();
    widget.on_change(Box::new(move |task_id: &str, checked: bool| {
        tracker.update(task_id, checked);
    }));

    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Widget {
        options: Mutex<Option<MultiSelectOptions>>,
        listener: Mutex<Option<ChangeListener>>,
    }

    impl Widget {
        fn toggle(&self, value: &str, checked: bool) {
            if let Some(listener) = self.listener.lock().unwrap().as_ref() {
                listener(value, checked);
            }
        }
    }

    impl MultiSelectWidget for Widget {
        fn init(&self, options: &MultiSelectOptions) {
            *self.options.lock().unwrap() = Some(options.clone());
        }
        fn on_change(&self, listener: ChangeListener) {
            *self.listener.lock().unwrap() = Some(listener);
        }
    }

    #[test]
    fn test_widget_initialised_with_select_all() {
        let widget = Widget::default();
        attach_task_selector(&widget);

        let options = widget.options.lock().unwrap().clone().unwrap();
        assert!(options.include_select_all);
        assert_eq!(options.non_selected_text, "Select Tasks");
    }

    #[test]
    fn test_selection_tracks_changes() {
        let widget = Widget::default();
        let selection = attach_task_selector(&widget);

        widget.toggle("3", true);
        widget.toggle("7", true);
        widget.toggle("3", false);
        widget.toggle("7", true);

        assert_eq!(selection.selected(), vec!["7".to_string()]);
        assert!(!selection.contains("3"));
    }
}
