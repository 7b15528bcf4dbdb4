use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pet::{Availability, PetSearchResult};
use crate::serde::deserialize_optional_string;

/// A completed adoption, one row of the transactions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub pet_id: String,
    pub transaction_id: Uuid,
    pub adoption_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Transaction {
    /// A new transaction for `pet_id`, dated now.
    pub fn new(pet_id: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            pet_id: pet_id.into(),
            transaction_id: Uuid::new_v4(),
            adoption_date: Utc::now(),
            user_id,
        }
    }
}

/// An adoption as listed by `GET /api/adoptionlist/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adoption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactionid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adoptiondate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuteness_rate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pettype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peturl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl Adoption {
    /// Merges a transaction row with the pet it refers to.
    pub fn from_parts(transaction: &Transaction, pet: PetSearchResult) -> Self {
        Self {
            transactionid: Some(transaction.transaction_id.to_string()),
            adoptiondate: Some(transaction.adoption_date.to_rfc3339()),
            availability: Some(pet.availability),
            cuteness_rate: Some(pet.cuteness_rate),
            petcolor: Some(pet.petcolor),
            petid: Some(pet.petid),
            pettype: Some(pet.pettype),
            peturl: Some(pet.peturl),
            price: Some(pet.price),
        }
    }
}

/// Raw query string of the complete-adoption endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteAdoptionQuery {
    #[serde(rename = "petId", alias = "petid")]
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub pet_id: Option<String>,
    #[serde(rename = "pettype", alias = "petType")]
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub pet_type: Option<String>,
    #[serde(rename = "userId", alias = "userid")]
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub user_id: Option<String>,
}

/// A validated adoption request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdoptionRequest {
    pub pet_id: String,
    pub pet_type: String,
    pub user_id: Option<String>,
}

/// Body sent to the status updater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub petid: String,
    pub pettype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub petavailability: Option<String>,
}

impl StatusUpdate {
    /// Marks a pet as adopted.
    pub fn adopted(petid: impl Into<String>, pettype: impl Into<String>) -> Self {
        Self {
            petid: petid.into(),
            pettype: pettype.into(),
            petavailability: None,
        }
    }

    /// Makes a pet available again.
    pub fn available(petid: impl Into<String>, pettype: impl Into<String>) -> Self {
        Self {
            petavailability: Some(Availability::Yes.to_string()),
            ..Self::adopted(petid, pettype)
        }
    }

    /// The presence of `petavailability` means "available again".
    pub fn target_availability(&self) -> Availability {
        match self.petavailability {
            Some(_) => Availability::Yes,
            None => Availability::No,
        }
    }
}

/// Queue message emitted for every completed adoption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionHistoryMessage {
    pub transaction_id: String,
    pub pet_id: String,
    pub pet_type: String,
    #[serde(default)]
    pub user_id: String,
    pub adoption_date: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

impl AdoptionHistoryMessage {
    pub fn new(transaction: &Transaction, pet_type: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction.transaction_id.to_string(),
            pet_id: transaction.pet_id.clone(),
            pet_type: pet_type.into(),
            user_id: transaction.user_id.clone().unwrap_or_default(),
            adoption_date: transaction.adoption_date,
            timestamp: Utc::now(),
        }
    }

    /// The history row this message describes.
    pub fn to_transaction(&self) -> Result<Transaction, uuid::Error> {
        Ok(Transaction {
            pet_id: self.pet_id.clone(),
            transaction_id: Uuid::parse_str(&self.transaction_id)?,
            adoption_date: self.adoption_date,
            user_id: Some(self.user_id.clone()).filter(|u| !u.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> PetSearchResult {
        PetSearchResult {
            petid: "014".to_string(),
            availability: "no".to_string(),
            cuteness_rate: "3".to_string(),
            petcolor: "grey".to_string(),
            pettype: "bunny".to_string(),
            price: "99".to_string(),
            peturl: "https://example.com/bunnies/b4.jpg".to_string(),
        }
    }

    #[test]
    fn test_transaction_new_generates_unique_ids() {
        let a = Transaction::new("001", None);
        let b = Transaction::new("001", None);
        assert_ne!(a.transaction_id, b.transaction_id);
        assert_eq!(a.pet_id, "001");
    }

    #[test]
    fn test_adoption_from_parts() {
        let transaction = Transaction::new("014", Some("user-1".to_string()));
        let adoption = Adoption::from_parts(&transaction, sample_result());

        assert_eq!(
            adoption.transactionid,
            Some(transaction.transaction_id.to_string())
        );
        assert_eq!(adoption.petid.as_deref(), Some("014"));
        assert_eq!(adoption.pettype.as_deref(), Some("bunny"));
        assert!(adoption.adoptiondate.is_some());
    }

    #[test]
    fn test_adoption_omits_absent_fields() {
        let json = serde_json::to_value(Adoption::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_status_update_target_availability() {
        assert_eq!(
            StatusUpdate::adopted("1", "puppy").target_availability(),
            Availability::No
        );
        assert_eq!(
            StatusUpdate::available("1", "puppy").target_availability(),
            Availability::Yes
        );
    }

    #[test]
    fn test_status_update_adopted_omits_availability() {
        let json = serde_json::to_value(StatusUpdate::adopted("1", "puppy")).unwrap();
        assert_eq!(json, serde_json::json!({"petid": "1", "pettype": "puppy"}));
    }

    #[test]
    fn test_history_message_is_camel_case() {
        let transaction = Transaction::new("007", None);
        let message = AdoptionHistoryMessage::new(&transaction, "kitten");
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(json["petId"], "007");
        assert_eq!(json["petType"], "kitten");
        assert_eq!(json["userId"], "");
        assert_eq!(
            json["transactionId"],
            transaction.transaction_id.to_string()
        );
        assert!(json.get("adoptionDate").is_some());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_history_message_to_transaction() {
        let transaction = Transaction::new("007", Some("user-2".to_string()));
        let message = AdoptionHistoryMessage::new(&transaction, "kitten");

        assert_eq!(message.to_transaction().unwrap(), transaction);
    }

    #[test]
    fn test_history_message_with_invalid_transaction_id() {
        let mut message = AdoptionHistoryMessage::new(&Transaction::new("007", None), "kitten");
        message.transaction_id = "not-a-uuid".to_string();

        assert!(message.to_transaction().is_err());
    }

    #[test]
    fn test_complete_adoption_query_aliases() {
        let query: CompleteAdoptionQuery =
            serde_json::from_str(r#"{"petId":"1","petType":"puppy"}"#).unwrap();
        assert_eq!(query.pet_id.as_deref(), Some("1"));
        assert_eq!(query.pet_type.as_deref(), Some("puppy"));
        assert_eq!(query.user_id, None);
    }
}
