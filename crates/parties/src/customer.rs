use serde::{Deserialize, Serialize};

use galleria_core::{CustomerId, DomainError, DomainResult, Searchable};

/// A customer as returned by `GET /Customers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(rename = "relativeID", default)]
    pub relative_id: Option<CustomerId>,
    #[serde(rename = "relativeName", default)]
    pub relative_name: Option<String>,
}

impl Customer {
    /// Link a relative, copying their display name.
    pub fn set_relative(&mut self, relative: &Customer) -> DomainResult<()> {
        if relative.id == self.id {
            return Err(DomainError::validation(
                "a customer cannot be their own relative",
            ));
        }
        self.relative_id = Some(relative.id.clone());
        self.relative_name = Some(relative.name.clone());
        Ok(())
    }

    pub fn clear_relative(&mut self) {
        self.relative_id = None;
        self.relative_name = None;
    }

    /// Checks run before `PUT /Customers/{id}`.
    pub fn validate(&self) -> DomainResult<()> {
        validate_fields(&self.id, &self.name, self.relative_id.as_ref())
    }
}

impl Searchable for Customer {
    fn search_key(&self) -> &str {
        &self.name
    }
}

/// Body of `POST /Customers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub id: CustomerId,
    pub name: String,
    #[serde(rename = "relativeID")]
    pub relative_id: Option<CustomerId>,
}

impl NewCustomer {
    pub fn validate(&self) -> DomainResult<()> {
        validate_fields(&self.id, &self.name, self.relative_id.as_ref())
    }
}

fn validate_fields(
    id: &CustomerId,
    name: &str,
    relative_id: Option<&CustomerId>,
) -> DomainResult<()> {
    if !id.is_well_formed() {
        return Err(DomainError::invalid_id(format!(
            "customer id {id} must be 14 digits"
        )));
    }
    if name.trim().is_empty() {
        return Err(DomainError::validation("name cannot be empty"));
    }
    if let Some(relative) = relative_id {
        if !relative.is_well_formed() {
            return Err(DomainError::invalid_id(format!(
                "relative id {relative} must be 14 digits"
            )));
        }
        if relative == id {
            return Err(DomainError::validation(
                "a customer cannot be their own relative",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(s: &str) -> CustomerId {
        CustomerId::parse(s).unwrap()
    }

    fn customer(id: &str, name: &str) -> Customer {
        Customer {
            id: cid(id),
            name: name.to_string(),
            relative_id: None,
            relative_name: None,
        }
    }

    #[test]
    fn decodes_backend_field_names() {
        let json = serde_json::json!({
            "id": "29801011234567",
            "name": "Mona",
            "relativeID": "29501011234567",
            "relativeName": "Sami"
        });
        let c: Customer = serde_json::from_value(json).unwrap();
        assert_eq!(c.relative_id, Some(cid("29501011234567")));
        assert_eq!(c.relative_name.as_deref(), Some("Sami"));
    }

    #[test]
    fn missing_relative_decodes_as_none() {
        let c: Customer =
            serde_json::from_value(serde_json::json!({ "id": "29801011234567", "name": "Mona" }))
                .unwrap();
        assert!(c.relative_id.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn new_customer_serializes_null_relative() {
        let new = NewCustomer {
            id: cid("29801011234567"),
            name: "Mona".to_string(),
            relative_id: None,
        };
        assert_eq!(
            serde_json::to_value(&new).unwrap(),
            serde_json::json!({ "id": "29801011234567", "name": "Mona", "relativeID": null })
        );
    }

    #[test]
    fn relative_must_differ_from_customer() {
        let mut mona = customer("29801011234567", "Mona");
        let same = mona.clone();
        assert!(mona.set_relative(&same).is_err());

        let sami = customer("29501011234567", "Sami");
        mona.set_relative(&sami).unwrap();
        assert_eq!(mona.relative_name.as_deref(), Some("Sami"));

        mona.clear_relative();
        assert!(mona.relative_id.is_none());
    }

    #[test]
    fn validation_rejects_blank_name_and_malformed_ids() {
        let new = NewCustomer {
            id: cid("29801011234567"),
            name: " ".to_string(),
            relative_id: None,
        };
        assert!(matches!(new.validate(), Err(DomainError::Validation(_))));

        let legacy: Customer = serde_json::from_value(
            serde_json::json!({ "id": "123", "name": "Old record" }),
        )
        .unwrap();
        assert!(matches!(legacy.validate(), Err(DomainError::InvalidId(_))));
    }
}
