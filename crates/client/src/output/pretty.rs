//! Pretty output formatting.

use petadoptions_core::adoption::Adoption;
use petadoptions_core::pet::PetSearchResult;

/// Format a pet for display.
pub fn format_pet(pet: &PetSearchResult) -> String {
    let mut output = format!(
        "{} {}\n  Color: {}\n  Price: {}\n  Cuteness: {}\n  Available: {}",
        pet.pettype, pet.petid, pet.petcolor, pet.price, pet.cuteness_rate, pet.availability
    );
    if !pet.peturl.is_empty() {
        output.push_str(&format!("\n  Image: {}", pet.peturl));
    }
    output
}

/// Format pets for display.
pub fn format_pets(pets: &[PetSearchResult]) -> String {
    if pets.is_empty() {
        return "No pets found.".to_string();
    }
    let mut output = format!("PETS ({})\n", pets.len());
    output.push_str(&"-".repeat(40));
    for pet in pets {
        output.push_str(&format!("\n{}", format_pet(pet)));
        output.push('\n');
    }
    output
}

/// Format an adoption for display.
pub fn format_adoption(adoption: &Adoption) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

    format!(
        "{} {}\n  Transaction: {}\n  Date: {}\n  Price: {}",
        field(&adoption.pettype),
        field(&adoption.petid),
        field(&adoption.transactionid),
        field(&adoption.adoptiondate),
        field(&adoption.price)
    )
}

/// Format adoptions for display.
pub fn format_adoptions(adoptions: &[Adoption]) -> String {
    if adoptions.is_empty() {
        return "No adoptions found.".to_string();
    }
    let mut output = format!("ADOPTIONS ({})\n", adoptions.len());
    output.push_str(&"-".repeat(40));
    for adoption in adoptions {
        output.push_str(&format!("\n{}", format_adoption(adoption)));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet() -> PetSearchResult {
        PetSearchResult {
            petid: "012".to_string(),
            availability: "yes".to_string(),
            cuteness_rate: "3".to_string(),
            petcolor: "white".to_string(),
            pettype: "puppy".to_string(),
            price: "250".to_string(),
            peturl: String::new(),
        }
    }

    #[test]
    fn test_format_pets_empty() {
        assert_eq!(format_pets(&[]), "No pets found.");
    }

    #[test]
    fn test_format_pet_without_url() {
        let output = format_pet(&pet());
        assert!(output.starts_with("puppy 012"));
        assert!(output.contains("Price: 250"));
        assert!(!output.contains("Image:"));
    }

    #[test]
    fn test_format_adoption_missing_fields() {
        let adoption = Adoption {
            petid: Some("012".to_string()),
            ..Adoption::default()
        };
        let output = format_adoption(&adoption);
        assert!(output.contains("Transaction: -"));
        assert!(output.starts_with("- 012"));
    }

    #[test]
    fn test_format_adoptions_counts() {
        let adoptions = vec![Adoption::default(), Adoption::default()];
        assert!(format_adoptions(&adoptions).starts_with("ADOPTIONS (2)"));
    }
}
