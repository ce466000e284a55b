//! Search index document of an ad.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::{Ad, Category, NamedRef, Neighbourhood};

/// Neighbourhood as indexed, keeping its city for geographic filtering
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchNeighbourhood {
    pub id: Uuid,
    pub name: String,
    pub city_id: Uuid,
}

/// Document handed to the external search indexer for one ad
#[derive(ToSchema, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdSearchDocument {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub category: NamedRef,
    pub neighbourhood: SearchNeighbourhood,
}

impl AdSearchDocument {
    pub fn new(ad: Ad, category: &Category, neighbourhood: &Neighbourhood) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            description: ad.description,
            price: ad.price,
            created_at: ad.created_at,
            category: NamedRef::new(category.id, category.name.clone()),
            neighbourhood: SearchNeighbourhood {
                id: neighbourhood.id,
                name: neighbourhood.name.clone(),
                city_id: neighbourhood.city_id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_carries_category_and_neighbourhood() {
        let category = Category::new("Phones".to_string(), None);
        let neighbourhood = Neighbourhood {
            id: Uuid::now_v7(),
            city_id: Uuid::now_v7(),
            name: "Kreuzberg".to_string(),
        };
        let now = Utc::now();
        let ad = Ad {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            category_id: category.id,
            title: "Pixel 8".to_string(),
            description: "Like new".to_string(),
            neighbourhood_id: neighbourhood.id,
            price: 400,
            show_phone_number: true,
            created_at: now,
            updated_at: now,
        };

        let doc = AdSearchDocument::new(ad.clone(), &category, &neighbourhood);
        let json = serde_json::to_value(&doc).unwrap();

        assert_eq!(json["category"]["name"], "Phones");
        assert_eq!(
            json["neighbourhood"]["city_id"],
            serde_json::json!(neighbourhood.city_id)
        );
        assert_eq!(json["price"], 400);
        assert_eq!(doc.id, ad.id);
    }
}
