//! Settings fields exposed to the host's configuration UI.

use serde::Serialize;

/// Input type of a settings field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Boolean,
}

/// A single settings field as rendered by the host settings UI.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigField {
    pub name: &'static str,
    pub friendly_name: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
}

/// Gateway identity shown alongside the settings form.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayMetadata {
    pub display_name: &'static str,
    pub version: &'static str,
}

pub fn metadata() -> GatewayMetadata {
    GatewayMetadata {
        display_name: "AliPay",
        version: "1.0",
    }
}

/// The settings this gateway reads, in display order.
///
/// Key mode (raw public key string) and cert mode (three certificate file
/// paths) are mutually exclusive; which half applies is selected by
/// `is_key_mode`, not enforced here.
pub fn config_schema() -> Vec<ConfigField> {
    vec![
        ConfigField {
            name: "app_id",
            friendly_name: "APP ID",
            field_type: FieldType::Text,
            required: true,
        },
        ConfigField {
            name: "live",
            friendly_name: "Live mode",
            field_type: FieldType::Boolean,
            required: false,
        },
        ConfigField {
            name: "is_key_mode",
            friendly_name: "Key mode",
            field_type: FieldType::Boolean,
            required: false,
        },
        // key mode
        ConfigField {
            name: "private_key",
            friendly_name: "Private Key",
            field_type: FieldType::Text,
            required: false,
        },
        ConfigField {
            name: "alipay_public_key",
            friendly_name: "Public key (for not cert mode)",
            field_type: FieldType::Text,
            required: false,
        },
        // cert mode
        ConfigField {
            name: "app_cert_public_key",
            friendly_name: "App cert public key path (for cert mode)",
            field_type: FieldType::Text,
            required: false,
        },
        ConfigField {
            name: "alipay_cert_public_key",
            friendly_name: "Alipay cert public path (for cert mode)",
            field_type: FieldType::Text,
            required: false,
        },
        ConfigField {
            name: "alipay_root_cert",
            friendly_name: "Alipay root cert path (for cert mode)",
            field_type: FieldType::Text,
            required: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_fields() {
        let schema = config_schema();
        assert_eq!(schema.len(), 8);

        let names: Vec<_> = schema.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            [
                "app_id",
                "live",
                "is_key_mode",
                "private_key",
                "alipay_public_key",
                "app_cert_public_key",
                "alipay_cert_public_key",
                "alipay_root_cert",
            ]
        );

        // Only the app id is mandatory; mode selection decides the rest.
        let required: Vec<_> = schema.iter().filter(|f| f.required).collect();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0].name, "app_id");

        let booleans: Vec<_> = schema
            .iter()
            .filter(|f| f.field_type == FieldType::Boolean)
            .map(|f| f.name)
            .collect();
        assert_eq!(booleans, ["live", "is_key_mode"]);
    }

    #[test]
    fn test_schema_serializes_for_settings_ui() {
        let json = serde_json::to_value(config_schema()).unwrap();
        assert_eq!(json[0]["name"], "app_id");
        assert_eq!(json[0]["type"], "text");
        assert_eq!(json[1]["type"], "boolean");
    }
}
