//! # The Shared Edit Form
//!
//! A checkout page owns exactly one address form. Every rendered address that starts an
//! edit session writes into that same instance ([`SharedForm`]); the last writer wins.
//!
//! ## Fields
//!
//! Fields are addressed by name and kept in document order. Scalar fields use the
//! address field names (`firstname`, `city`, `country_id`, ...). Street lines are a
//! variable-length group of inputs named by position: `street[0]`, `street[1]`, ...
//!
//! ## Street Line Growth
//!
//! Binding an address with more street lines than the form has inputs appends new
//! inputs. Binding never removes inputs: after editing a three-line address and then a
//! one-line address, `street[1]` and `street[2]` still hold the first address's values.
//! Callers that want a clean slate call [`AddressForm::clear_street_lines`] first.
//!
//! ## Update Mode
//!
//! Binding switches the form from "add" to "update" presentation: the default footer is
//! hidden, the update affordance is shown, and an update control is created the first
//! time it is needed. Submitting goes through
//! [`crate::controller::AddressMutationController::submit_form`].

use crate::config::CheckoutConfig;
use crate::model::Address;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

pub type SharedForm = Rc<RefCell<AddressForm>>;

const STREET_FIELD_PREFIX: &str = "street[";
const STREET_INPUT_CLASS: &str = "input-text";
const UPDATE_CONTROL_CLASS: &str = "action primary action-update-address";

pub fn street_field_name(index: usize) -> String {
    format!("{}{}]", STREET_FIELD_PREFIX, index)
}

/// Index of a `street[N]` field name.
pub(crate) fn street_index(name: &str) -> Option<usize> {
    name.strip_prefix(STREET_FIELD_PREFIX)?
        .strip_suffix(']')?
        .parse()
        .ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Input,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
    pub class: Option<String>,
}

impl FormField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: String::new(),
            class: None,
        }
    }
}

/// The action control that submits an edit session.
///
/// Activating it runs [`crate::controller::AddressMutationController::submit_form`],
/// which updates the address the popup was last opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateControl {
    pub label: String,
    pub class: &'static str,
}

/// One serialized name/value pair, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormEntry {
    pub name: String,
    pub value: String,
}

impl FormEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressForm {
    fields: Vec<FormField>,
    footer_visible: bool,
    update_control: Option<UpdateControl>,
    update_control_visible: bool,
}

impl Default for AddressForm {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            footer_visible: true,
            update_control: None,
            update_control_visible: false,
        }
    }
}

impl AddressForm {
    /// An empty form in "add" presentation.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock shipping form: every scalar field plus one street line.
    pub fn shipping() -> Self {
        Self::new()
            .with_field("firstname", FieldKind::Input)
            .with_field("lastname", FieldKind::Input)
            .with_field("company", FieldKind::Input)
            .with_field(street_field_name(0), FieldKind::Input)
            .with_field("city", FieldKind::Input)
            .with_field("region", FieldKind::Input)
            .with_field("region_id", FieldKind::Select)
            .with_field("postcode", FieldKind::Input)
            .with_field("country_id", FieldKind::Select)
            .with_field("telephone", FieldKind::Input)
    }

    pub fn with_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FormField::new(name, kind));
        self
    }

    pub fn into_shared(self) -> SharedForm {
        Rc::new(RefCell::new(self))
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.value.as_str())
    }

    /// Set an existing field's value. Returns false if no field has that name.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn street_line_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|f| street_index(&f.name).is_some())
            .count()
    }

    /// Street line values ordered by index.
    pub fn street_lines(&self) -> Vec<String> {
        let mut lines: Vec<(usize, &str)> = self
            .fields
            .iter()
            .filter_map(|f| street_index(&f.name).map(|i| (i, f.value.as_str())))
            .collect();
        lines.sort_by_key(|(i, _)| *i);
        lines.into_iter().map(|(_, v)| v.to_string()).collect()
    }

    /// Remove every street line input. Returns how many were removed.
    pub fn clear_street_lines(&mut self) -> usize {
        let before = self.fields.len();
        self.fields.retain(|f| street_index(&f.name).is_none());
        before - self.fields.len()
    }

    /// Name/value pairs for every field, in document order.
    pub fn serialize(&self) -> Vec<FormEntry> {
        self.fields
            .iter()
            .map(|f| FormEntry::new(f.name.clone(), f.value.clone()))
            .collect()
    }

    pub fn footer_visible(&self) -> bool {
        self.footer_visible
    }

    pub fn update_control(&self) -> Option<&UpdateControl> {
        self.update_control.as_ref()
    }

    pub fn update_control_visible(&self) -> bool {
        self.update_control_visible
    }

    /// Set street line `index`, appending a new input if the form has none at that index.
    /// Returns true when an input was created.
    pub fn set_street_line(&mut self, index: usize, line: &str) -> bool {
        let name = street_field_name(index);
        if self.set_value(&name, line) {
            return false;
        }
        let mut field = FormField::new(name, FieldKind::Input);
        field.value = line.to_string();
        field.class = Some(STREET_INPUT_CLASS.to_string());
        self.fields.push(field);
        true
    }
}

/// What a bind pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    pub fields_populated: usize,
    pub street_lines_created: usize,
    pub update_control_created: bool,
}

/// Copies an address into the shared form and puts the form in update mode.
#[derive(Debug, Clone)]
pub struct AddressFormBinder {
    update_label: String,
}

impl AddressFormBinder {
    pub fn new(config: &CheckoutConfig) -> Self {
        Self {
            update_label: config.update_button_label.clone(),
        }
    }

    pub fn populate(&self, form: &mut AddressForm, address: &Address) -> BindReport {
        let mut report = BindReport::default();

        form.footer_visible = false;
        form.update_control_visible = true;

        for field in form.fields.iter_mut() {
            if let Some(value) = address.field(&field.name) {
                debug!(field = %field.name, value, "populating form field");
                field.value = value.to_string();
                report.fields_populated += 1;
            }
        }

        for (index, line) in address.street.iter().enumerate() {
            if form.set_street_line(index, line) {
                debug!(index, line = %line, "created street line input");
                report.street_lines_created += 1;
            } else {
                debug!(index, line = %line, "populated street line input");
            }
            report.fields_populated += 1;
        }

        if form.update_control.is_none() {
            form.update_control = Some(UpdateControl {
                label: self.update_label.clone(),
                class: UPDATE_CONTROL_CLASS,
            });
            report.update_control_created = true;
        }

        report
    }
}
