use crate::config::toml_config::FormConfig;
use crate::domain::phone;
use crate::utils::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 表單送出時的原始欄位值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFields {
    pub name: String,
    pub phone: String,
    pub age: String,
}

impl LeadFields {
    pub fn new(name: impl Into<String>, phone: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            age: age.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Phone,
    Age,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Phone, Field::Age];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Age => "age",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    pub name: bool,
    pub phone: bool,
    pub age: bool,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.name && self.phone && self.age
    }

    pub fn get(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name,
            Field::Phone => self.phone,
            Field::Age => self.age,
        }
    }

    pub fn invalid_fields(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| !self.get(*f)).collect()
    }
}

/// 送往遠端端點的名單資料，建立後不可變更
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadSubmission {
    name: String,
    phone: String,
    age: String,
    timestamp: String,
}

impl LeadSubmission {
    /// 依欄位建立 payload；欄位不合法時回傳第一個出錯欄位的 `Validation` 錯誤
    pub fn build(
        fields: &LeadFields,
        rules: &FormConfig,
        tz: Tz,
        timestamp_format: &str,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let report = crate::core::validation::validate(fields, rules);
        if let Some(field) = report.invalid_fields().first() {
            return Err(GatewayError::Validation {
                field: field.to_string(),
                message: crate::core::validation::rule_description(*field, rules),
            });
        }

        let local = now.with_timezone(&tz);
        let mut timestamp = String::new();
        fmt::Write::write_fmt(&mut timestamp, format_args!("{}", local.format(timestamp_format)))
            .map_err(|_| GatewayError::InvalidConfigValueError {
                field: "submission.timestamp_format".to_string(),
                value: timestamp_format.to_string(),
                reason: "Unsupported strftime pattern".to_string(),
            })?;

        // 只有九位數的號碼套用輸入遮罩，其他長度原樣送出數字
        let local_number = if rules.phone_digits == phone::MASK_DIGITS {
            phone::format_phone_input(&fields.phone)
        } else {
            phone::digits(&fields.phone)
        };

        Ok(Self {
            name: fields.name.trim().to_string(),
            phone: format!("{} {}", rules.country_prefix, local_number),
            age: fields.age.clone(),
            timestamp,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    InFlight,
    Settled,
}

impl SubmissionState {
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            SubmissionState::Idle => 0,
            SubmissionState::InFlight => 1,
            SubmissionState::Settled => 2,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            1 => SubmissionState::InFlight,
            2 => SubmissionState::Settled,
            _ => SubmissionState::Idle,
        }
    }
}

/// `FormGateway::submit` 的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 已有送出進行中或尚未復原，這次呼叫被忽略
    Ignored,
    Rejected(ValidationReport),
    Delivered { attempts: u32 },
    Failed { attempts: u32, reason: String },
}
