// src/services/seed.rs

//! Idempotent dev fixture loader behind `POST /api/dev/seed`. Out of scope
//! for production; every fixture is guarded by an existence probe on its
//! natural key so repeated runs are no-ops.

use serde_json::json;
use tracing::{info, instrument};

use super::{cart, passwords, payload, row};
use crate::backend::{DataBackend, Filter, SelectQuery};
use crate::errors::Result;
use crate::models::{NewProduct, User};

struct FixtureUser {
  email: &'static str,
  name: &'static str,
  password: &'static str,
}

const FIXTURE_USERS: &[FixtureUser] = &[
  FixtureUser {
    email: "harry@hogwarts.com",
    name: "Harry Potter",
    password: "password123",
  },
  FixtureUser {
    email: "hermione@hogwarts.com",
    name: "Hermione Granger",
    password: "password123",
  },
  FixtureUser {
    email: "ron@hogwarts.com",
    name: "Ron Weasley",
    password: "password123",
  },
];

fn fixture_products() -> Vec<NewProduct> {
  let product = |name: &str, description: &str, price: f64, image: &str, category: &str| NewProduct {
    name: name.to_string(),
    description: Some(description.to_string()),
    price,
    stock: None,
    category: Some(category.to_string()),
    image: Some(image.to_string()),
  };
  vec![
    product(
      "Elder Wand",
      "The most powerful wand ever made.",
      999.99,
      "https://i.pinimg.com/736x/8d/58/f8/elderwand.jpg",
      "Wands",
    ),
    product(
      "Polyjuice Potion",
      "Transforms you into someone else for an hour.",
      499.00,
      "https://i.pinimg.com/736x/42/f3/potion.jpg",
      "Potions",
    ),
    product(
      "Expelliarmus Spell",
      "Disarms your opponent instantly.",
      150.00,
      "https://i.pinimg.com/736x/7b/21/spell.jpg",
      "Spells",
    ),
    product(
      "Crystal Ball",
      "See visions of the future.",
      350.00,
      "https://i.pinimg.com/736x/1c/42/crystal.jpg",
      "Artifacts",
    ),
    product(
      "Invisibility Cloak",
      "Grants the wearer true invisibility.",
      1200.00,
      "https://i.pinimg.com/736x/11/22/cloak.jpg",
      "Artifacts",
    ),
  ]
}

/// Load the fixture users, products and per-user carts.
#[instrument(name = "seed::run", skip(backend))]
pub async fn run(backend: &dyn DataBackend) -> Result<()> {
  for fixture in FIXTURE_USERS {
    let existing = backend
      .select(
        "users",
        SelectQuery::new()
          .columns("id")
          .filter(Filter::eq("email", fixture.email))
          .limit(1),
      )
      .await?;
    if existing.is_empty() {
      let user = json!({
        "email": fixture.email,
        "name": fixture.name,
        "password_hash": passwords::hash_password(fixture.password)?,
      });
      backend.insert("users", &[user], None).await?;
      info!(email = fixture.email, "Seeded fixture user.");
    }
  }

  for fixture in fixture_products() {
    let existing = backend
      .select(
        "products",
        SelectQuery::new()
          .columns("id")
          .filter(Filter::eq("name", fixture.name.as_str()))
          .limit(1),
      )
      .await?;
    if existing.is_empty() {
      backend.insert("products", &[payload(&fixture)?], None).await?;
      info!(name = %fixture.name, "Seeded fixture product.");
    }
  }

  // Every user gets a cart; the resolver's upsert makes this idempotent.
  let users = backend.select("users", SelectQuery::new()).await?;
  for value in users {
    let user: User = row(value)?;
    cart::resolve_cart(backend, user.id).await?;
  }

  info!("Dev seed complete.");
  Ok(())
}
