// FICHIER : src-core/src/schema/registry.rs

use super::field_type::{FieldType, Widget};
use super::value::{parse_date, parse_number, FieldValue, InputValue, DATE_STORAGE_FORMAT};
use crate::utils::data::Value;
use crate::utils::i18n::Translator;
use crate::utils::{AppError, VitrineResult};

/// Comportement d'un type de champ : contrôle de saisie, conversions et affichage.
pub trait FieldBehavior: Send + Sync {
    fn field_type(&self) -> FieldType;

    fn widget(&self) -> Widget {
        self.field_type().widget()
    }

    /// Valeur stockée -> valeur du contrôle de saisie.
    fn to_input_value(&self, raw: Option<&Value>) -> InputValue;

    /// Saisie -> valeur typée. Une saisie vide donne `FieldValue::Empty`.
    fn from_input_value(&self, input: &InputValue) -> VitrineResult<FieldValue>;

    /// Texte d'affichage calculé à la lecture (jamais stocké).
    fn format(&self, raw: Option<&Value>, tr: &Translator) -> String;
}

struct StringField;
struct TextField;
struct NumberField;
struct BooleanField;
struct DateField;

static STRING_FIELD: StringField = StringField;
static TEXT_FIELD: TextField = TextField;
static NUMBER_FIELD: NumberField = NumberField;
static BOOLEAN_FIELD: BooleanField = BooleanField;
static DATE_FIELD: DateField = DateField;

/// Comportement associé à un type.
pub fn resolve(field_type: FieldType) -> &'static dyn FieldBehavior {
    match field_type {
        FieldType::String => &STRING_FIELD,
        FieldType::Text => &TEXT_FIELD,
        FieldType::Number => &NUMBER_FIELD,
        FieldType::Boolean => &BOOLEAN_FIELD,
        FieldType::Date => &DATE_FIELD,
    }
}

/// Résolution depuis un tag brut ; un tag inconnu retombe sur `string`.
pub fn resolve_tag(tag: &str) -> &'static dyn FieldBehavior {
    resolve(FieldType::parse_lenient(tag))
}

// --- HELPERS ---

fn expect_text<'a>(field_type: FieldType, input: &'a InputValue) -> VitrineResult<&'a str> {
    match input {
        InputValue::Text(s) => Ok(s.as_str()),
        InputValue::Choice(_) => Err(AppError::Validation(format!(
            "Un choix oui/non n'est pas une saisie valide pour un champ '{}'",
            field_type
        ))),
    }
}

/// Texte brut d'une valeur scalaire (chaîne sans guillemets).
fn raw_text(raw: Option<&Value>) -> String {
    match raw {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// --- IMPLÉMENTATIONS ---

impl FieldBehavior for StringField {
    fn field_type(&self) -> FieldType {
        FieldType::String
    }

    fn to_input_value(&self, raw: Option<&Value>) -> InputValue {
        InputValue::Text(raw_text(raw))
    }

    fn from_input_value(&self, input: &InputValue) -> VitrineResult<FieldValue> {
        let s = expect_text(self.field_type(), input)?;
        Ok(if s.is_empty() {
            FieldValue::Empty
        } else {
            FieldValue::String(s.to_string())
        })
    }

    fn format(&self, raw: Option<&Value>, _tr: &Translator) -> String {
        raw_text(raw)
    }
}

impl FieldBehavior for TextField {
    fn field_type(&self) -> FieldType {
        FieldType::Text
    }

    fn to_input_value(&self, raw: Option<&Value>) -> InputValue {
        InputValue::Text(raw_text(raw))
    }

    fn from_input_value(&self, input: &InputValue) -> VitrineResult<FieldValue> {
        let s = expect_text(self.field_type(), input)?;
        Ok(if s.is_empty() {
            FieldValue::Empty
        } else {
            FieldValue::Text(s.to_string())
        })
    }

    fn format(&self, raw: Option<&Value>, _tr: &Translator) -> String {
        raw_text(raw)
    }
}

impl FieldBehavior for NumberField {
    fn field_type(&self) -> FieldType {
        FieldType::Number
    }

    fn to_input_value(&self, raw: Option<&Value>) -> InputValue {
        InputValue::Text(raw_text(raw))
    }

    fn from_input_value(&self, input: &InputValue) -> VitrineResult<FieldValue> {
        let s = expect_text(self.field_type(), input)?;
        if s.trim().is_empty() {
            return Ok(FieldValue::Empty);
        }
        parse_number(s)
            .map(FieldValue::Number)
            .ok_or_else(|| AppError::Validation(format!("'{}' n'est pas un nombre", s)))
    }

    // Affichage tel que stocké (nombre ou chaîne numérique)
    fn format(&self, raw: Option<&Value>, _tr: &Translator) -> String {
        raw_text(raw)
    }
}

impl FieldBehavior for BooleanField {
    fn field_type(&self) -> FieldType {
        FieldType::Boolean
    }

    fn to_input_value(&self, raw: Option<&Value>) -> InputValue {
        InputValue::Choice(FieldValue::from_raw(FieldType::Boolean, raw).is_truthy())
    }

    fn from_input_value(&self, input: &InputValue) -> VitrineResult<FieldValue> {
        match input {
            InputValue::Choice(b) => Ok(FieldValue::Boolean(*b)),
            InputValue::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "y" | "1" | "on" => Ok(FieldValue::Boolean(true)),
                "false" | "no" | "n" | "0" | "off" | "" => Ok(FieldValue::Boolean(false)),
                other => Err(AppError::Validation(format!(
                    "'{}' n'est pas une réponse oui/non",
                    other
                ))),
            },
        }
    }

    // Une clé absente s'affiche "non"
    fn format(&self, raw: Option<&Value>, tr: &Translator) -> String {
        tr.yes_no(FieldValue::from_raw(FieldType::Boolean, raw).is_truthy())
    }
}

impl FieldBehavior for DateField {
    fn field_type(&self) -> FieldType {
        FieldType::Date
    }

    fn to_input_value(&self, raw: Option<&Value>) -> InputValue {
        match FieldValue::from_raw(FieldType::Date, raw) {
            FieldValue::Date(d) => InputValue::Text(d.format(DATE_STORAGE_FORMAT).to_string()),
            _ => InputValue::Text(String::new()),
        }
    }

    fn from_input_value(&self, input: &InputValue) -> VitrineResult<FieldValue> {
        let s = expect_text(self.field_type(), input)?;
        if s.trim().is_empty() {
            return Ok(FieldValue::Empty);
        }
        parse_date(s)
            .map(FieldValue::Date)
            .ok_or_else(|| AppError::Validation(format!("'{}' n'est pas une date AAAA-MM-JJ", s)))
    }

    fn format(&self, raw: Option<&Value>, tr: &Translator) -> String {
        match FieldValue::from_raw(FieldType::Date, raw) {
            FieldValue::Date(d) => tr.format_date(d),
            _ => String::new(),
        }
    }
}
