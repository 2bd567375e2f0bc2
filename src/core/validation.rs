use crate::config::toml_config::FormConfig;
use crate::domain::model::{Field, LeadFields, ValidationReport};
use crate::domain::phone;

pub fn validate_name(name: &str, rules: &FormConfig) -> bool {
    name.trim().chars().count() >= rules.min_name_length
}

pub fn validate_phone(raw: &str, rules: &FormConfig) -> bool {
    phone::digits(raw).len() == rules.phone_digits
}

pub fn validate_age(age: &str, rules: &FormConfig) -> bool {
    if age.is_empty() {
        return false;
    }
    rules.age_brackets.is_empty() || rules.age_brackets.iter().any(|b| b == age)
}

/// 純函式：同樣的輸入永遠得到同樣的結果
pub fn validate(fields: &LeadFields, rules: &FormConfig) -> ValidationReport {
    ValidationReport {
        name: validate_name(&fields.name, rules),
        phone: validate_phone(&fields.phone, rules),
        age: validate_age(&fields.age, rules),
    }
}

pub fn rule_description(field: Field, rules: &FormConfig) -> String {
    match field {
        Field::Name => format!("must be at least {} characters", rules.min_name_length),
        Field::Phone => format!("must contain exactly {} digits", rules.phone_digits),
        Field::Age if rules.age_brackets.is_empty() => "an age bracket must be selected".to_string(),
        Field::Age => format!("must be one of: {}", rules.age_brackets.join(", ")),
    }
}
