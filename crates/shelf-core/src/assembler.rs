//! Builds the immutable [`Product`] record from a draft and the resolved photo URLs.

use uuid::Uuid;

use crate::error::ParseError;
use crate::models::{Product, ProductDraft};

/// Assemble a product record.
///
/// Every call generates a fresh id. Text fields are trimmed; an empty description or offer
/// becomes `None`. The offer is only parsed when present, so a blank offer never fails.
pub fn assemble(draft: &ProductDraft, image_urls: &[String]) -> Result<Product, ParseError> {
    let price_text = draft.price.trim();
    let price = parse_decimal(price_text).ok_or_else(|| ParseError::Price(price_text.to_string()))?;

    let offer_text = draft.offer_percentage.trim();
    let offer_percentage = if offer_text.is_empty() {
        None
    } else {
        Some(
            parse_decimal(offer_text)
                .ok_or_else(|| ParseError::OfferPercentage(offer_text.to_string()))?,
        )
    };

    let description = draft.description.trim();

    Ok(Product {
        id: Uuid::new_v4().to_string(),
        name: draft.name.trim().to_string(),
        category: draft.category.trim().to_string(),
        price,
        offer_percentage,
        description: (!description.is_empty()).then(|| description.to_string()),
        colors: draft.colors.clone(),
        sizes: parse_sizes(&draft.sizes),
        images: image_urls.to_vec(),
    })
}

/// Split a comma separated size list. Tokens are trimmed and kept in order, including empty
/// ones produced by doubled commas.
pub fn parse_sizes(sizes: &str) -> Option<Vec<String>> {
    let sizes = sizes.trim();
    if sizes.is_empty() {
        return None;
    }
    Some(sizes.split(',').map(|s| s.trim().to_string()).collect())
}

fn parse_decimal(text: &str) -> Option<f32> {
    text.parse::<f32>().ok().filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArgbColor, ImageHandle};

    fn draft() -> ProductDraft {
        ProductDraft {
            name: "  Shirt ".to_string(),
            category: "Apparel".to_string(),
            price: "19.99".to_string(),
            images: vec![ImageHandle::from("a.png"), ImageHandle::from("b.png")],
            colors: vec![ArgbColor(0xff11_2233), ArgbColor(0xff44_5566)],
            ..Default::default()
        }
    }

    fn urls() -> Vec<String> {
        vec![
            "http://cdn/products/images/1.jpg".to_string(),
            "http://cdn/products/images/2.jpg".to_string(),
        ]
    }

    #[test]
    fn test_minimal_draft() {
        let product = assemble(&draft(), &urls()).unwrap();

        assert_eq!(product.name, "Shirt");
        assert_eq!(product.category, "Apparel");
        assert_eq!(product.price, 19.99);
        assert_eq!(product.offer_percentage, None);
        assert_eq!(product.description, None);
        assert_eq!(product.sizes, None);
        assert_eq!(product.images, urls());
        assert_eq!(product.colors, vec![ArgbColor(0xff11_2233), ArgbColor(0xff44_5566)]);
        assert!(Uuid::parse_str(&product.id).is_ok());
    }

    #[test]
    fn test_optional_fields() {
        let draft = ProductDraft {
            offer_percentage: " 15 ".to_string(),
            description: " Soft cotton ".to_string(),
            ..draft()
        };

        let product = assemble(&draft, &urls()).unwrap();
        assert_eq!(product.offer_percentage, Some(15.0));
        assert_eq!(product.description.as_deref(), Some("Soft cotton"));
    }

    #[test]
    fn test_whitespace_description_is_absent() {
        let draft = ProductDraft {
            description: "   ".to_string(),
            ..draft()
        };
        assert_eq!(assemble(&draft, &urls()).unwrap().description, None);
    }

    #[test]
    fn test_sizes() {
        assert_eq!(
            parse_sizes("S, M, L"),
            Some(vec!["S".to_string(), "M".to_string(), "L".to_string()])
        );
        assert_eq!(parse_sizes(""), None);
        assert_eq!(parse_sizes("  "), None);
        assert_eq!(
            parse_sizes("XL,,S"),
            Some(vec!["XL".to_string(), String::new(), "S".to_string()])
        );

        let draft = ProductDraft {
            sizes: "S, M, L".to_string(),
            ..draft()
        };
        assert_eq!(
            assemble(&draft, &urls()).unwrap().sizes,
            Some(vec!["S".to_string(), "M".to_string(), "L".to_string()])
        );
    }

    #[test]
    fn test_invalid_price() {
        for price in ["abc", "12,5", "NaN", "inf"] {
            let draft = ProductDraft {
                price: price.to_string(),
                ..draft()
            };
            assert_eq!(
                assemble(&draft, &urls()),
                Err(ParseError::Price(price.to_string()))
            );
        }
    }

    #[test]
    fn test_invalid_offer_only_fails_when_present() {
        let draft = ProductDraft {
            offer_percentage: "ten".to_string(),
            ..draft()
        };
        let err = assemble(&draft, &urls()).unwrap_err();
        assert_eq!(err, ParseError::OfferPercentage("ten".to_string()));
        assert_eq!(err.field(), "offer_percentage");
    }

    #[test]
    fn test_repeated_assembly_differs_only_by_id() {
        let draft = draft();
        let first = assemble(&draft, &urls()).unwrap();
        let second = assemble(&draft, &urls()).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(
            Product {
                id: String::new(),
                ..first
            },
            Product {
                id: String::new(),
                ..second
            }
        );
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let draft = draft();
        let before = draft.clone();
        let urls = urls();
        let _ = assemble(&draft, &urls).unwrap();
        assert_eq!(draft, before);
        assert_eq!(urls.len(), 2);
    }
}
