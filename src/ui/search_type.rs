/// `#search_value` input and its `<label>`
pub trait SearchValueInput: Send + Sync {
    fn set_label(&self, text: &str);
    fn set_placeholder(&self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPrompt {
    pub label: &'static str,
    pub placeholder: &'static str,
}

pub fn search_prompt(search_type: &str) -> Option<SearchPrompt> {
    match search_type {
        "gov_id" => Some(SearchPrompt {
            label: "Enter Government ID",
            placeholder: "Aadhar/Voter ID/Driving License",
        }),
        "phone_number" => Some(SearchPrompt {
            label: "Enter Phone Number",
            placeholder: "Phone Number",
        }),
        _ => None,
    }
}

/// `#search_type` 變更時更新提示文字；未知類型不動
pub fn on_search_type_change<I: SearchValueInput + ?Sized>(search_type: &str, input: &I) -> bool {
    match search_prompt(search_type) {
        Some(prompt) => {
            input.set_label(prompt.label);
            input.set_placeholder(prompt.placeholder);
            true
        }
        None => false,
    }
}
