//! Presentation attributes stamped onto form field descriptors

use models_classifieds::FieldKind;

use super::property_form::FieldDescriptor;

fn css_class(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Char | FieldKind::Integer => "form-control",
        FieldKind::Choice => "form-select",
        FieldKind::Boolean => "form-check-input",
    }
}

/// Adds the widget `class` (appended to any existing one) and a `placeholder`
/// defaulting to the label.
pub fn decorate(fields: &mut [FieldDescriptor]) {
    for field in fields {
        let class = css_class(field.kind);
        field
            .attrs
            .entry("class".to_string())
            .and_modify(|existing| {
                if !existing.split_whitespace().any(|c| c == class) {
                    existing.push(' ');
                    existing.push_str(class);
                }
            })
            .or_insert_with(|| class.to_string());
        field
            .attrs
            .entry("placeholder".to_string())
            .or_insert_with(|| field.label.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models_classifieds::DataType;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    fn field(kind: FieldKind, data_type: DataType) -> FieldDescriptor {
        FieldDescriptor {
            name: "prop_x".to_string(),
            property_id: Uuid::now_v7(),
            label: "Storage".to_string(),
            kind,
            data_type,
            required: false,
            initial: None,
            choices: vec![],
            attrs: BTreeMap::new(),
        }
    }

    #[test]
    fn stamps_class_per_kind() {
        let mut fields = vec![
            field(FieldKind::Char, DataType::Text),
            field(FieldKind::Integer, DataType::Number),
            field(FieldKind::Choice, DataType::Choice),
            field(FieldKind::Boolean, DataType::Boolean),
        ];
        decorate(&mut fields);

        let classes: Vec<_> = fields.iter().map(|f| f.attrs["class"].as_str()).collect();
        assert_eq!(
            classes,
            vec!["form-control", "form-control", "form-select", "form-check-input"]
        );
        assert_eq!(fields[0].attrs["placeholder"], "Storage");
    }

    #[test]
    fn appends_to_existing_class_once() {
        let mut fields = vec![field(FieldKind::Char, DataType::Text)];
        fields[0]
            .attrs
            .insert("class".to_string(), "wide".to_string());
        fields[0]
            .attrs
            .insert("placeholder".to_string(), "e.g. 128".to_string());

        decorate(&mut fields);
        decorate(&mut fields);

        assert_eq!(fields[0].attrs["class"], "wide form-control");
        assert_eq!(fields[0].attrs["placeholder"], "e.g. 128");
    }
}
