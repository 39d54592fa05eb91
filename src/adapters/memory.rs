use crate::core::{ClassList, Document, FormPort};
use crate::utils::error::{AutofillError, Result};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

/// 記憶體中的表單，欄位必須先宣告才能寫入
#[derive(Debug, Default)]
pub struct InMemoryForm {
    fields: Mutex<HashMap<String, String>>,
}

impl InMemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(ids: &[&str]) -> Self {
        let fields = ids
            .iter()
            .map(|id| (id.to_string(), String::new()))
            .collect();
        Self {
            fields: Mutex::new(fields),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.fields.lock().map_err(|_| AutofillError::FormError {
            message: "form state lock poisoned".to_string(),
        })
    }
}

fn missing_field(id: &str) -> AutofillError {
    AutofillError::FormError {
        message: format!("no element with id '{}'", id),
    }
}

impl FormPort for InMemoryForm {
    fn read_field(&self, id: &str) -> Option<String> {
        self.lock().ok()?.get(id).cloned()
    }

    fn write_field(&self, id: &str, value: &str) -> Result<()> {
        let mut fields = self.lock()?;
        let slot = fields.get_mut(id).ok_or_else(|| missing_field(id))?;
        *slot = value.to_string();
        Ok(())
    }

    fn write_fields(&self, values: &[(&str, &str)]) -> Result<()> {
        let mut fields = self.lock()?;
        if let Some((id, _)) = values.iter().find(|(id, _)| !fields.contains_key(*id)) {
            return Err(missing_field(id));
        }
        for (id, value) in values {
            fields.insert(id.to_string(), value.to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryElement {
    classes: Mutex<BTreeSet<String>>,
}

impl InMemoryElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes(classes: &[&str]) -> Self {
        Self {
            classes: Mutex::new(classes.iter().map(|c| c.to_string()).collect()),
        }
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes
            .lock()
            .map(|classes| classes.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl ClassList for InMemoryElement {
    fn add_class(&self, class: &str) {
        if let Ok(mut classes) = self.classes.lock() {
            classes.insert(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        if let Ok(mut classes) = self.classes.lock() {
            classes.remove(class);
        }
    }

    fn toggle_class(&self, class: &str) -> bool {
        let Ok(mut classes) = self.classes.lock() else {
            return false;
        };
        if classes.remove(class) {
            false
        } else {
            classes.insert(class.to_string());
            true
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes
            .lock()
            .map(|classes| classes.contains(class))
            .unwrap_or(false)
    }
}

#[derive(Default)]
pub struct InMemoryDocument {
    elements: HashMap<String, Arc<InMemoryElement>>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: &str, element: InMemoryElement) -> Arc<InMemoryElement> {
        let element = Arc::new(element);
        self.elements.insert(id.to_string(), Arc::clone(&element));
        element
    }
}

impl Document for InMemoryDocument {
    fn element(&self, id: &str) -> Option<Arc<dyn ClassList>> {
        self.elements
            .get(id)
            .map(|element| Arc::clone(element) as Arc<dyn ClassList>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_fields_is_all_or_nothing() {
        let form = InMemoryForm::with_fields(&["state", "city"]);
        let err = form
            .write_fields(&[("state", "Goa"), ("city", "Panaji"), ("society", "Altinho")])
            .unwrap_err();

        assert!(err.to_string().contains("society"));
        assert_eq!(form.read_field("state").as_deref(), Some(""));
        assert_eq!(form.read_field("city").as_deref(), Some(""));
    }

    #[test]
    fn test_undeclared_field_cannot_be_written() {
        let form = InMemoryForm::new();
        assert!(form.write_field("state", "Goa").is_err());
        assert_eq!(form.read_field("state"), None);
    }

    #[test]
    fn test_toggle_class() {
        let element = InMemoryElement::with_classes(&["card"]);
        assert!(element.toggle_class("d-none"));
        assert!(element.has_class("d-none"));
        assert!(!element.toggle_class("d-none"));
        assert_eq!(element.classes(), vec!["card".to_string()]);
    }
}
