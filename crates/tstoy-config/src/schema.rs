//! JSON schema describing the settings a caller may supply

use serde_json::{Value, json};

use crate::types::Frequency;

/// Draft 2020-12 schema for desired settings input.
pub fn resource_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "TSToy Settings Resource",
        "type": "object",
        "required": ["scope"],
        "additionalProperties": false,
        "properties": {
            "scope": {
                "title": "Target configuration scope",
                "description": "Defines which of TSToy's config files to manage.",
                "type": "string",
                "enum": ["machine", "user"]
            },
            "ensure": {
                "title": "Ensure configuration file existence",
                "description": "Defines whether the config file should exist.",
                "type": "string",
                "enum": ["present", "absent"],
                "default": "present"
            },
            "updateAutomatically": {
                "title": "Should update automatically",
                "description": "Indicates whether TSToy should check for updates when it starts.",
                "type": "boolean"
            },
            "updateFrequency": {
                "title": "Update check frequency",
                "description": "Indicates how many days TSToy should wait before checking for updates.",
                "type": "integer",
                "minimum": Frequency::MIN,
                "maximum": Frequency::MAX
            }
        }
    })
}
