//! Explicit view model of the panel document.
//!
//! Everything the handlers read or write lives here instead of in a live
//! document: element values and flags, the tab strip, button visibility and
//! user notices. Lookups mirror the selectors the panel uses and fail with
//! [`PanelError::MissingElement`] naming the selector.

use std::collections::VecDeque;

use coax_common::values::parse_position;

use crate::error::{PanelError, PanelResult};

/// Notices kept before the oldest is dropped.
const MAX_NOTICES: usize = 5;

/// What kind of control an element is.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
    Range,
    /// A select with its option values in display order.
    Select(Vec<String>),
    /// Read-only display of a backend value.
    Output,
}

impl FieldKind {
    fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Number | FieldKind::Range)
    }
}

/// Native form constraints of an input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Constraints {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Why a control failed constraint validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invalidity {
    ValueMissing,
    BadNumber,
    RangeUnderflow,
    RangeOverflow,
}

/// A control that failed validation, named by its selector.
#[derive(Clone, Debug, PartialEq)]
pub struct InvalidField {
    pub selector: String,
    pub reason: Invalidity,
}

/// A single control or display element.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: Option<String>,
    pub name: Option<String>,
    pub label: String,
    pub kind: FieldKind,
    value: String,
    pub disabled: bool,
    pub hidden: bool,
    pub readonly: bool,
    pub constraints: Constraints,
    /// Tab key of the panel the element is rendered in.
    pub section: String,
    pub fieldset: Option<String>,
    pub form: Option<String>,
}

impl Element {
    fn new(kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            id: None,
            name: None,
            label: label.into(),
            kind,
            value: String::new(),
            disabled: false,
            hidden: false,
            readonly: false,
            constraints: Constraints::default(),
            section: String::new(),
            fieldset: None,
            form: None,
        }
    }

    /// A display element addressed by id.
    pub fn output(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(FieldKind::Output, label).with_id(id)
    }

    /// A named form control.
    pub fn field(kind: FieldKind, name: impl Into<String>, label: impl Into<String>) -> Self {
        let mut element = Self::new(kind, label);
        element.name = Some(name.into());
        element
    }

    /// An unnamed control addressed by id.
    pub fn control(kind: FieldKind, id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(kind, label).with_id(id)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.assign(value);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Write a value the way a document does.
    ///
    /// A select only takes values among its options; anything else leaves
    /// it with nothing selected.
    pub fn assign(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.value = match &self.kind {
            FieldKind::Select(options) if !options.contains(&value) => String::new(),
            _ => value,
        };
    }

    /// Selector that addresses this element, preferring the id.
    pub fn selector(&self) -> String {
        match (&self.id, &self.name) {
            (Some(id), _) => format!("#{id}"),
            (None, Some(name)) => format!("[name={name}]"),
            (None, None) => self.label.clone(),
        }
    }

    /// Constraint validation; disabled, read-only and output elements are
    /// never invalid.
    pub fn validity(&self) -> Option<Invalidity> {
        if self.disabled || self.readonly || self.kind == FieldKind::Output {
            return None;
        }
        if self.value.is_empty() {
            return self.constraints.required.then_some(Invalidity::ValueMissing);
        }
        if !self.kind.is_numeric() {
            return None;
        }
        let Ok(number) = parse_position(&self.value) else {
            return Some(Invalidity::BadNumber);
        };
        if self.constraints.min.is_some_and(|min| number < min) {
            return Some(Invalidity::RangeUnderflow);
        }
        if self.constraints.max.is_some_and(|max| number > max) {
            return Some(Invalidity::RangeOverflow);
        }
        None
    }
}

/// A group of named inputs addressed as `fieldset#id`.
#[derive(Clone, Debug, PartialEq)]
pub struct Fieldset {
    pub id: String,
    pub legend: String,
    pub section: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub id: String,
    pub label: String,
    pub hidden: bool,
    pub section: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tab {
    pub key: String,
    pub label: String,
}

impl Tab {
    /// Id of the tab handle, `tab-<key>`.
    pub fn tab_id(&self) -> String {
        format!("tab-{}", self.key)
    }

    /// Id of the content panel, the key itself.
    pub fn panel_id(&self) -> &str {
        &self.key
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-visible message, the panel's replacement for `alert`.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// The whole panel document.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewModel {
    elements: Vec<Element>,
    fieldsets: Vec<Fieldset>,
    buttons: Vec<Button>,
    tabs: Vec<Tab>,
    active_tab: usize,
    notices: VecDeque<Notice>,
    next_notice: u64,
}

impl ViewModel {
    pub fn builder() -> ViewBuilder {
        ViewBuilder::default()
    }

    // ---- elements -------------------------------------------------------

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Elements of one section with their document index.
    pub fn elements_in<'a>(&'a self, section: &'a str) -> impl Iterator<Item = (usize, &'a Element)> + 'a {
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.section == section)
    }

    pub fn element_at(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn element_at_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    /// `#id`
    pub fn element(&self, id: &str) -> PanelResult<&Element> {
        self.elements
            .iter()
            .find(|e| e.id.as_deref() == Some(id))
            .ok_or_else(|| PanelError::MissingElement(format!("#{id}")))
    }

    /// `#id`
    pub fn element_mut(&mut self, id: &str) -> PanelResult<&mut Element> {
        self.elements
            .iter_mut()
            .find(|e| e.id.as_deref() == Some(id))
            .ok_or_else(|| PanelError::MissingElement(format!("#{id}")))
    }

    /// `[name=x]`, first match in document order.
    pub fn named(&self, name: &str) -> PanelResult<&Element> {
        self.elements
            .iter()
            .find(|e| e.name.as_deref() == Some(name))
            .ok_or_else(|| PanelError::MissingElement(format!("[name={name}]")))
    }

    /// `[name=x]`, first match in document order.
    pub fn named_mut(&mut self, name: &str) -> PanelResult<&mut Element> {
        self.elements
            .iter_mut()
            .find(|e| e.name.as_deref() == Some(name))
            .ok_or_else(|| PanelError::MissingElement(format!("[name={name}]")))
    }

    pub fn value(&self, id: &str) -> PanelResult<&str> {
        self.element(id).map(Element::value)
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> PanelResult<()> {
        self.element_mut(id)?.assign(value);
        Ok(())
    }

    pub fn set_disabled(&mut self, id: &str, disabled: bool) -> PanelResult<()> {
        self.element_mut(id)?.disabled = disabled;
        Ok(())
    }

    // ---- fieldsets ------------------------------------------------------

    /// `fieldset#id`
    pub fn fieldset(&self, id: &str) -> Option<&Fieldset> {
        self.fieldsets.iter().find(|f| f.id == id)
    }

    pub fn fieldsets_in<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a Fieldset> + 'a {
        self.fieldsets.iter().filter(move |f| f.section == section)
    }

    /// `#fieldset [name="x"]`
    pub fn fieldset_input_mut(&mut self, fieldset: &str, name: &str) -> Option<&mut Element> {
        self.elements
            .iter_mut()
            .find(|e| e.fieldset.as_deref() == Some(fieldset) && e.name.as_deref() == Some(name))
    }

    // ---- buttons --------------------------------------------------------

    pub fn button(&self, id: &str) -> PanelResult<&Button> {
        self.buttons
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| PanelError::MissingElement(format!("#{id}")))
    }

    pub fn set_button_hidden(&mut self, id: &str, hidden: bool) -> PanelResult<()> {
        let button = self
            .buttons
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| PanelError::MissingElement(format!("#{id}")))?;
        button.hidden = hidden;
        Ok(())
    }

    pub fn buttons_in<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a Button> + 'a {
        self.buttons.iter().filter(move |b| b.section == section)
    }

    // ---- tabs -----------------------------------------------------------

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_tab(&self) -> &str {
        self.tabs
            .get(self.active_tab)
            .map(|t| t.key.as_str())
            .unwrap_or("")
    }

    /// Whether `#tab-<key>` carries `active` and `#<key>` carries `visible`.
    pub fn is_tab_active(&self, key: &str) -> bool {
        self.active_tab() == key
    }

    /// Move the active/visible marker pair to the tab identified by `key`.
    pub fn switch_tab(&mut self, key: &str) -> PanelResult<()> {
        let index = self
            .tabs
            .iter()
            .position(|t| t.key == key)
            .ok_or_else(|| PanelError::MissingElement(format!("#tab-{key}")))?;
        self.active_tab = index;
        Ok(())
    }

    // ---- forms ----------------------------------------------------------

    fn form_elements<'a>(&'a self, form: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements
            .iter()
            .filter(move |e| e.form.as_deref() == Some(form))
    }

    /// Constraint validation of every control in `form`; empty when valid.
    pub fn form_validity(&self, form: &str) -> Vec<InvalidField> {
        self.form_elements(form)
            .filter_map(|e| {
                e.validity().map(|reason| InvalidField {
                    selector: e.selector(),
                    reason,
                })
            })
            .collect()
    }

    /// Name/value pairs a submission of `form` carries, in document order.
    ///
    /// Disabled and unnamed controls are not submitted.
    pub fn form_data(&self, form: &str) -> Vec<(String, String)> {
        self.form_elements(form)
            .filter(|e| !e.disabled && e.kind != FieldKind::Output)
            .filter_map(|e| e.name.clone().map(|name| (name, e.value.clone())))
            .collect()
    }

    // ---- notices --------------------------------------------------------

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        let id = self.next_notice;
        self.next_notice += 1;
        self.notices.push_back(Notice {
            id,
            level,
            message: message.into(),
        });
        while self.notices.len() > MAX_NOTICES {
            self.notices.pop_front();
        }
        id
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn dismiss_notice(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }
}

/// Builds a [`ViewModel`] in document order.
///
/// Elements land in the most recent tab's section and in the open form or
/// fieldset, if any.
#[derive(Default)]
pub struct ViewBuilder {
    elements: Vec<Element>,
    fieldsets: Vec<Fieldset>,
    buttons: Vec<Button>,
    tabs: Vec<Tab>,
    form: Option<String>,
    fieldset: Option<String>,
}

impl ViewBuilder {
    fn section(&self) -> String {
        self.tabs.last().map(|t| t.key.clone()).unwrap_or_default()
    }

    /// Start a tab and its content panel; the first tab starts active.
    pub fn tab(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.form = None;
        self.fieldset = None;
        self.tabs.push(Tab {
            key: key.into(),
            label: label.into(),
        });
        self
    }

    pub fn begin_form(mut self, id: impl Into<String>) -> Self {
        self.form = Some(id.into());
        self
    }

    pub fn end_form(mut self) -> Self {
        self.form = None;
        self
    }

    pub fn begin_fieldset(mut self, id: impl Into<String>, legend: impl Into<String>) -> Self {
        let id = id.into();
        self.fieldsets.push(Fieldset {
            id: id.clone(),
            legend: legend.into(),
            section: self.section(),
        });
        self.fieldset = Some(id);
        self
    }

    pub fn end_fieldset(mut self) -> Self {
        self.fieldset = None;
        self
    }

    pub fn element(mut self, mut element: Element) -> Self {
        element.section = self.section();
        element.form = self.form.clone();
        element.fieldset = self.fieldset.clone();
        self.elements.push(element);
        self
    }

    pub fn button(mut self, id: impl Into<String>, label: impl Into<String>, hidden: bool) -> Self {
        let section = self.section();
        self.buttons.push(Button {
            id: id.into(),
            label: label.into(),
            hidden,
            section,
        });
        self
    }

    pub fn build(self) -> ViewModel {
        ViewModel {
            elements: self.elements,
            fieldsets: self.fieldsets,
            buttons: self.buttons,
            tabs: self.tabs,
            active_tab: 0,
            notices: VecDeque::new(),
            next_notice: 0,
        }
    }
}
