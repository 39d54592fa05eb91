use crate::adapters::http::HttpDirectoryClient;
use crate::core::resolver::AddressAutofillResolver;
use crate::core::{AutofillOutcome, ClassList, ConfigProvider, DirectoryClient, FormPort};
use crate::ui::datepicker::{attach_datepickers, DatePicker};
use crate::ui::flash::{schedule_dismissal, DismissibleAlert};
use crate::ui::form_validation::{on_submit, SubmitDecision, ValidatableForm};
use crate::ui::preview::{on_documents_selected, PhotoInput, PreviewContainer, SelectedFile};
use crate::ui::rating::{render_rating_displays, sync_rating_input, RatingDisplayElement};
use crate::ui::search_type::{on_search_type_change, SearchValueInput};
use crate::ui::tasks::{attach_task_selector, MultiSelectWidget, TaskSelection};
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// 依設定建立使用 HTTP 目錄服務的 resolver
pub fn autofill_from_config<C, F>(
    config: &C,
    form: F,
) -> Result<AddressAutofillResolver<HttpDirectoryClient, F>>
where
    C: ConfigProvider + ?Sized,
    F: FormPort,
{
    let directory = HttpDirectoryClient::from_config(config)?;
    Ok(AddressAutofillResolver::new(directory, form)
        .with_min_length(config.min_length())
        .with_stale_policy(config.stale_policy()))
}

/// What the page template actually rendered. Absent pieces are skipped.
pub struct Page<D: DirectoryClient, F: FormPort> {
    pub autofill: Option<Arc<AddressAutofillResolver<D, F>>>,
    pub alerts: Vec<Arc<dyn DismissibleAlert>>,
    pub task_widget: Option<Arc<dyn MultiSelectWidget>>,
    pub date_picker: Option<Arc<dyn DatePicker>>,
    pub datepicker_ids: Vec<String>,
    /// `.needs-validation` forms, in document order.
    pub forms: Vec<Arc<dyn ValidatableForm>>,
    pub rating_displays: Vec<Arc<dyn RatingDisplayElement>>,
    /// Stars of each `[data-rating=<name>]` group, keyed by input name.
    pub rating_stars: HashMap<String, Vec<Arc<dyn ClassList>>>,
    pub search_value: Option<Arc<dyn SearchValueInput>>,
    pub photo: Option<PhotoInput>,
    pub documents: Option<Arc<dyn PreviewContainer>>,
}

impl<D: DirectoryClient, F: FormPort> Default for Page<D, F> {
    fn default() -> Self {
        Self {
            autofill: None,
            alerts: Vec::new(),
            task_widget: None,
            date_picker: None,
            datepicker_ids: Vec::new(),
            forms: Vec::new(),
            rating_displays: Vec::new(),
            rating_stars: HashMap::new(),
            search_value: None,
            photo: None,
            documents: None,
        }
    }
}

pub struct PageHandles<D: DirectoryClient, F: FormPort> {
    autofill: Option<Arc<AddressAutofillResolver<D, F>>>,
    forms: Vec<Arc<dyn ValidatableForm>>,
    rating_stars: HashMap<String, Vec<Arc<dyn ClassList>>>,
    search_value: Option<Arc<dyn SearchValueInput>>,
    photo: Option<PhotoInput>,
    documents: Option<Arc<dyn PreviewContainer>>,
    pub dismissals: Vec<JoinHandle<bool>>,
    pub tasks: Option<TaskSelection>,
    pub datepickers: usize,
    pub ratings_rendered: usize,
}

/// 頁面載入完成時的初始化
pub fn bootstrap<D: DirectoryClient, F: FormPort>(
    page: Page<D, F>,
    flash_delay: Duration,
) -> PageHandles<D, F> {
    let dismissals = schedule_dismissal(page.alerts, flash_delay);

    let tasks = page
        .task_widget
        .as_deref()
        .map(|widget| attach_task_selector(widget));

    let datepickers = match &page.date_picker {
        Some(picker) => attach_datepickers(&**picker, &page.datepicker_ids),
        None => 0,
    };

    let ratings_rendered = render_rating_displays(&page.rating_displays);

    tracing::debug!(
        "Page ready: autofill={}, flash={}, tasks={}, datepickers={}, ratings={}, forms={}",
        page.autofill.is_some(),
        dismissals.len(),
        tasks.is_some(),
        datepickers,
        ratings_rendered,
        page.forms.len()
    );

    PageHandles {
        autofill: page.autofill,
        forms: page.forms,
        rating_stars: page.rating_stars,
        search_value: page.search_value,
        photo: page.photo,
        documents: page.documents,
        dismissals,
        tasks,
        datepickers,
        ratings_rendered,
    }
}

impl<D: DirectoryClient, F: FormPort> PageHandles<D, F> {
    /// Submit of the `index`-th `.needs-validation` form. `None` if there is no such form.
    pub fn submit(&self, index: usize) -> Option<SubmitDecision> {
        self.forms.get(index).map(|form| on_submit(&**form))
    }

    /// `.rating-input` change. Returns how many stars are active; 0 when
    /// the page has no star group for `name`.
    pub fn rating_input(&self, name: &str, value: &str) -> usize {
        match self.rating_stars.get(name) {
            Some(stars) => sync_rating_input(value, stars),
            None => 0,
        }
    }

    /// `#search_type` change
    pub fn search_type_change(&self, search_type: &str) -> bool {
        match &self.search_value {
            Some(input) => on_search_type_change(search_type, &**input),
            None => false,
        }
    }

    /// `#photo` change
    pub fn photo_selected(&self, files: &[SelectedFile]) -> Result<bool> {
        match &self.photo {
            Some(photo) => photo.on_selected(files),
            None => Ok(false),
        }
    }

    /// `#documents` change
    pub fn documents_selected(&self, files: &[SelectedFile]) -> bool {
        match &self.documents {
            Some(container) => {
                on_documents_selected(files, &**container);
                true
            }
            None => false,
        }
    }
}

impl<D, F> PageHandles<D, F>
where
    D: DirectoryClient + 'static,
    F: FormPort + 'static,
{
    /// `#pincode` input event. No-op when the page has no pincode field.
    pub fn pincode_input(&self, value: &str) -> Option<JoinHandle<AutofillOutcome>> {
        self.autofill.as_ref()?.handle_input(value)
    }

    pub fn has_autofill(&self) -> bool {
        self.autofill.is_some()
    }
}
