//! Dynamic property form built from the bindings of one category.
//!
//! Every binding becomes a [FieldDescriptor] named `prop_<property id>`. Submitted
//! values are cleaned by a dispatcher over [FieldKind] into the text stored in
//! `ad_property_values`.

use std::collections::{BTreeMap, HashMap};

use models_classifieds::api::{ChoiceOptionResponse, PropertyFieldResponse, PropertyFormResponse};
use models_classifieds::service::typed_value::is_truthy;
use models_classifieds::service::{AdPropertyValue, CategoryPropertySchema, FormErrors};
use models_classifieds::{DataType, FieldKind};
use serde_json::Value;
use uuid::Uuid;

use super::widgets;

const FIELD_PREFIX: &str = "prop_";
pub(crate) const REQUIRED: &str = "This field is required.";
const BLANK_LABEL: &str = "---------";

/// `prop_<property id>`
pub fn field_name(property_id: Uuid) -> String {
    format!("{FIELD_PREFIX}{property_id}")
}

/// Property id of a `prop_<property id>` field name
pub fn parse_field_name(name: &str) -> Option<Uuid> {
    name.strip_prefix(FIELD_PREFIX)
        .and_then(|id| Uuid::parse_str(id).ok())
}

pub(crate) fn invalid_choice(value: &str) -> String {
    format!("Select a valid choice. {value} is not one of the available choices.")
}

/// One field of the dynamic form
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub property_id: Uuid,
    pub label: String,
    pub kind: FieldKind,
    pub data_type: DataType,
    pub required: bool,
    pub initial: Option<Value>,
    /// Blank option first for choice fields, empty otherwise
    pub choices: Vec<ChoiceOptionResponse>,
    pub attrs: BTreeMap<String, String>,
}

impl FieldDescriptor {
    fn choice(&self, value: &str) -> Option<&ChoiceOptionResponse> {
        self.choices
            .iter()
            .find(|c| !c.value.is_empty() && c.value == value)
    }
}

impl From<FieldDescriptor> for PropertyFieldResponse {
    fn from(field: FieldDescriptor) -> Self {
        Self {
            name: field.name,
            property_id: field.property_id,
            label: field.label,
            kind: field.kind,
            data_type: field.data_type,
            required: field.required,
            initial: field.initial,
            choices: field.choices,
            attrs: field.attrs,
        }
    }
}

/// A value after coercion by its field kind
#[derive(Debug, Clone, PartialEq)]
enum Cleaned {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl Cleaned {
    /// Text persisted in `ad_property_values.value`
    fn into_stored(self) -> String {
        match self {
            Cleaned::Text(s) => s,
            Cleaned::Int(i) => i.to_string(),
            Cleaned::Bool(b) => b.to_string(),
        }
    }

    fn as_text(&self) -> String {
        self.clone().into_stored()
    }
}

/// The fields of one category's form, ordered by property name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyForm {
    fields: Vec<FieldDescriptor>,
}

impl PropertyForm {
    /// Builds the descriptors. `existing` are the stored values of the ad being
    /// edited and become each field's initial value.
    pub fn new(schemas: &[CategoryPropertySchema], existing: &[AdPropertyValue]) -> Self {
        let initial: HashMap<Uuid, Value> = existing
            .iter()
            .filter_map(|v| {
                serde_json::to_value(v.typed_value())
                    .ok()
                    .map(|json| (v.property_id, json))
            })
            .collect();

        // binding id -> (field name, label) and value id -> value
        let bindings: HashMap<Uuid, (String, String)> = schemas
            .iter()
            .map(|s| {
                (
                    s.binding.id,
                    (field_name(s.property.id), s.property.name.clone()),
                )
            })
            .collect();
        let values: HashMap<Uuid, &str> = schemas
            .iter()
            .flat_map(|s| s.values.iter().map(|v| (v.id, v.value.as_str())))
            .collect();

        let mut fields: Vec<FieldDescriptor> = schemas
            .iter()
            .map(|schema| {
                let kind = FieldKind::from(schema.property.data_type);
                let choices = match kind {
                    FieldKind::Choice => std::iter::once(ChoiceOptionResponse {
                        value: String::new(),
                        label: BLANK_LABEL.to_string(),
                        depends_on_field: None,
                        depends_on_value: None,
                    })
                    .chain(schema.values.iter().map(|v| {
                        let dependency = v
                            .depends_on_id
                            .and_then(|b| bindings.get(&b))
                            .zip(v.depends_on_value_id.and_then(|id| values.get(&id)));
                        ChoiceOptionResponse {
                            value: v.value.clone(),
                            label: v.value.clone(),
                            depends_on_field: dependency.map(|((field, _), _)| field.clone()),
                            depends_on_value: dependency.map(|(_, value)| value.to_string()),
                        }
                    }))
                    .collect(),
                    _ => Vec::new(),
                };

                FieldDescriptor {
                    name: field_name(schema.property.id),
                    property_id: schema.property.id,
                    label: schema.property.name.clone(),
                    kind,
                    data_type: schema.property.data_type,
                    required: schema.binding.required,
                    initial: initial.get(&schema.property.id).cloned(),
                    choices,
                    attrs: BTreeMap::new(),
                }
            })
            .collect();

        widgets::decorate(&mut fields);

        Self { fields }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn into_response(self, category_id: Option<Uuid>) -> PropertyFormResponse {
        PropertyFormResponse {
            category_id,
            fields: self.fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Validates submitted values keyed by field name.
    ///
    /// Returns the text to store per property id. Blank values are left out and
    /// keys that name no field are ignored.
    pub fn clean(&self, data: &BTreeMap<String, Value>) -> Result<BTreeMap<Uuid, String>, FormErrors> {
        let mut errors = FormErrors::new();
        let mut cleaned: BTreeMap<&str, (Uuid, Cleaned)> = BTreeMap::new();

        for field in &self.fields {
            match clean_value(field, data.get(&field.name)) {
                Ok(Some(value)) => {
                    cleaned.insert(field.name.as_str(), (field.property_id, value));
                }
                Ok(None) if field.required => errors.add_field(&field.name, REQUIRED),
                Ok(None) => {}
                Err(message) => errors.add_field(&field.name, message),
            }
        }

        for field in self.fields.iter().filter(|f| f.kind == FieldKind::Choice) {
            let Some((_, value)) = cleaned.get(field.name.as_str()) else {
                continue;
            };
            let value = value.as_text();
            let Some(option) = field.choice(&value) else {
                continue;
            };
            let (Some(dep_field), Some(dep_value)) =
                (&option.depends_on_field, &option.depends_on_value)
            else {
                continue;
            };

            let satisfied = cleaned
                .get(dep_field.as_str())
                .is_some_and(|(_, selected)| selected.as_text() == *dep_value);
            if !satisfied {
                let dep_label = self
                    .fields
                    .iter()
                    .find(|f| &f.name == dep_field)
                    .map_or(dep_field.as_str(), |f| f.label.as_str());
                errors.add_field(
                    &field.name,
                    format!("\"{value}\" requires {dep_label} to be \"{dep_value}\"."),
                );
            }
        }

        errors.into_result()?;

        Ok(cleaned
            .into_values()
            .map(|(property_id, value)| (property_id, value.into_stored()))
            .collect())
    }
}

/// Coerces one submitted value by its field kind. `Ok(None)` means blank.
fn clean_value(field: &FieldDescriptor, raw: Option<&Value>) -> Result<Option<Cleaned>, String> {
    let raw = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) if items.is_empty() => return Ok(None),
        Some(value) => value,
    };

    match field.kind {
        FieldKind::Char => clean_char(raw),
        FieldKind::Integer => clean_integer(raw),
        FieldKind::Boolean => clean_boolean(raw),
        FieldKind::Choice => {
            let Some(Cleaned::Text(value)) = clean_char(raw)? else {
                return Ok(None);
            };
            if field.choice(&value).is_some() {
                Ok(Some(Cleaned::Text(value)))
            } else {
                Err(invalid_choice(&value))
            }
        }
    }
}

fn clean_char(raw: &Value) -> Result<Option<Cleaned>, String> {
    let text = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return Err("Enter a valid value.".to_string()),
    };
    Ok((!text.is_empty()).then_some(Cleaned::Text(text)))
}

fn clean_integer(raw: &Value) -> Result<Option<Cleaned>, String> {
    const WHOLE_NUMBER: &str = "Enter a whole number.";

    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(Cleaned::Int(i)));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                    Ok(Some(Cleaned::Int(f as i64)))
                }
                _ => Err(WHOLE_NUMBER.to_string()),
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            // "12.00" is accepted as 12
            let digits = match trimmed.split_once('.') {
                Some((whole, fraction)) if fraction.chars().all(|c| c == '0') => whole,
                _ => trimmed,
            };
            digits
                .parse::<i64>()
                .map(|i| Some(Cleaned::Int(i)))
                .map_err(|_| WHOLE_NUMBER.to_string())
        }
        _ => Err(WHOLE_NUMBER.to_string()),
    }
}

fn clean_boolean(raw: &Value) -> Result<Option<Cleaned>, String> {
    match raw {
        Value::Bool(b) => Ok(Some(Cleaned::Bool(*b))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(Cleaned::Bool(is_truthy(s.trim())))),
        Value::Number(n) => Ok(Some(Cleaned::Bool(n.as_i64() == Some(1)))),
        _ => Err("Enter a valid value.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models_classifieds::service::{CategoryProperty, CategoryPropertyValue, Property};
    use serde_json::json;

    struct Fixture {
        schemas: Vec<CategoryPropertySchema>,
        storage: Property,
        color: Property,
        unlocked: Property,
        model: Property,
        brand: Property,
    }

    fn schema(
        category_id: Uuid,
        property: &Property,
        required: bool,
        values: Vec<CategoryPropertyValue>,
    ) -> CategoryPropertySchema {
        let mut binding = CategoryProperty::new(category_id, property.id, required);
        if let Some(first) = values.first() {
            binding.id = first.category_property_id;
        }
        CategoryPropertySchema {
            binding,
            property: property.clone(),
            values,
        }
    }

    fn fixture() -> Fixture {
        let category_id = Uuid::now_v7();
        let storage = Property::new("Storage".to_string(), DataType::Number);
        let color = Property::new("Color".to_string(), DataType::Choice);
        let unlocked = Property::new("Unlocked".to_string(), DataType::Boolean);
        let model = Property::new("Model".to_string(), DataType::Choice);
        let brand = Property::new("Brand".to_string(), DataType::Choice);

        let color_binding = Uuid::now_v7();
        let black = CategoryPropertyValue::new(color_binding, "Black".to_string());
        let white = CategoryPropertyValue::new(color_binding, "White".to_string());

        let brand_binding = Uuid::now_v7();
        let apple = CategoryPropertyValue::new(brand_binding, "Apple".to_string());
        let google = CategoryPropertyValue::new(brand_binding, "Google".to_string());

        let model_binding = Uuid::now_v7();
        let iphone = CategoryPropertyValue::new(model_binding, "iPhone 15".to_string())
            .depending_on(&apple);

        let schemas = vec![
            schema(category_id, &brand, false, vec![apple, google]),
            schema(category_id, &color, false, vec![black, white]),
            schema(category_id, &model, false, vec![iphone]),
            schema(category_id, &storage, true, vec![]),
            schema(category_id, &unlocked, false, vec![]),
        ];

        Fixture {
            schemas,
            storage,
            color,
            unlocked,
            model,
            brand,
        }
    }

    fn submit(pairs: &[(&Property, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(p, v)| (field_name(p.id), v.clone()))
            .collect()
    }

    #[test]
    fn field_names_round_trip() {
        let id = Uuid::now_v7();
        assert_eq!(parse_field_name(&field_name(id)), Some(id));
        assert_eq!(parse_field_name("title"), None);
        assert_eq!(parse_field_name("prop_nope"), None);
    }

    #[test]
    fn one_field_per_binding_with_mapped_kinds() {
        let f = fixture();
        let form = PropertyForm::new(&f.schemas, &[]);
        let kinds: Vec<_> = form.fields().iter().map(|f| (f.label.as_str(), f.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("Brand", FieldKind::Choice),
                ("Color", FieldKind::Choice),
                ("Model", FieldKind::Choice),
                ("Storage", FieldKind::Integer),
                ("Unlocked", FieldKind::Boolean),
            ]
        );

        let color = &form.fields()[1];
        assert_eq!(color.choices[0].value, "");
        assert_eq!(color.choices[0].label, BLANK_LABEL);
        assert_eq!(color.choices.len(), 3);

        let storage = &form.fields()[3];
        assert!(storage.required);
        assert!(storage.choices.is_empty());
    }

    #[test]
    fn dependency_is_carried_on_choices() {
        let f = fixture();
        let form = PropertyForm::new(&f.schemas, &[]);
        let model = form
            .fields()
            .iter()
            .find(|field| field.property_id == f.model.id)
            .unwrap();
        let iphone = &model.choices[1];
        assert_eq!(iphone.depends_on_field, Some(field_name(f.brand.id)));
        assert_eq!(iphone.depends_on_value.as_deref(), Some("Apple"));
    }

    #[test]
    fn initial_values_come_from_existing_ad() {
        let f = fixture();
        let existing = vec![AdPropertyValue {
            id: Uuid::now_v7(),
            ad_id: Uuid::now_v7(),
            property_id: f.storage.id,
            property_name: "Storage".to_string(),
            data_type: DataType::Number,
            value: "128".to_string(),
        }];
        let form = PropertyForm::new(&f.schemas, &existing);
        let storage = form
            .fields()
            .iter()
            .find(|field| field.property_id == f.storage.id)
            .unwrap();
        assert_eq!(storage.initial, Some(json!(128)));
    }

    #[test]
    fn missing_required_value_fails() {
        let f = fixture();
        let form = PropertyForm::new(&f.schemas, &[]);
        let errors = form.clean(&submit(&[(&f.color, json!("Black"))])).unwrap_err();
        assert_eq!(errors.for_field(&field_name(f.storage.id)), [REQUIRED]);
    }

    #[test]
    fn cleans_values_to_storage_text() {
        let f = fixture();
        let form = PropertyForm::new(&f.schemas, &[]);
        let mut data = submit(&[
            (&f.storage, json!("128.00")),
            (&f.color, json!(" White ")),
            (&f.unlocked, json!("YES")),
            (&f.brand, json!("")),
        ]);
        data.insert("prop_unknown".to_string(), json!("ignored"));

        let cleaned = form.clean(&data).unwrap();
        assert_eq!(cleaned.len(), 3);
        assert_eq!(cleaned[&f.storage.id], "128");
        assert_eq!(cleaned[&f.color.id], "White");
        assert_eq!(cleaned[&f.unlocked.id], "true");
    }

    #[test]
    fn rejects_bad_numbers_and_choices() {
        let f = fixture();
        let form = PropertyForm::new(&f.schemas, &[]);
        let errors = form
            .clean(&submit(&[
                (&f.storage, json!("12.5")),
                (&f.color, json!("Purple")),
            ]))
            .unwrap_err();

        assert_eq!(
            errors.for_field(&field_name(f.storage.id)),
            ["Enter a whole number."]
        );
        assert_eq!(
            errors.for_field(&field_name(f.color.id)),
            [invalid_choice("Purple")]
        );
    }

    #[test]
    fn json_numbers_and_booleans_are_accepted() {
        let f = fixture();
        let form = PropertyForm::new(&f.schemas, &[]);
        let cleaned = form
            .clean(&submit(&[(&f.storage, json!(256.0)), (&f.unlocked, json!(false))]))
            .unwrap();
        assert_eq!(cleaned[&f.storage.id], "256");
        assert_eq!(cleaned[&f.unlocked.id], "false");
    }

    #[test]
    fn dependent_value_requires_parent_selection() {
        let f = fixture();
        let form = PropertyForm::new(&f.schemas, &[]);

        let errors = form
            .clean(&submit(&[
                (&f.storage, json!(64)),
                (&f.brand, json!("Google")),
                (&f.model, json!("iPhone 15")),
            ]))
            .unwrap_err();
        assert_eq!(
            errors.for_field(&field_name(f.model.id)),
            ["\"iPhone 15\" requires Brand to be \"Apple\"."]
        );

        let cleaned = form
            .clean(&submit(&[
                (&f.storage, json!(64)),
                (&f.brand, json!("Apple")),
                (&f.model, json!("iPhone 15")),
            ]))
            .unwrap();
        assert_eq!(cleaned[&f.model.id], "iPhone 15");
    }

    #[test]
    fn response_keeps_field_order() {
        let f = fixture();
        let category_id = Uuid::now_v7();
        let response = PropertyForm::new(&f.schemas, &[]).into_response(Some(category_id));
        assert_eq!(response.category_id, Some(category_id));
        assert_eq!(response.fields.len(), 5);
        assert_eq!(response.fields[0].name, field_name(f.brand.id));
    }
}
