//! Data layer: schema, loading, filtering and export.
//!
//! Architecture:
//! ```text
//!  data.json  (array of envelopes)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  flatten message.content.contact_analytics → ContactRecord
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ ContactTable  │  Vec<ContactRecord>, unique contact_id
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  range → categorical → search, each a filtered copy
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  filtered copy → CSV
//!   └──────────┘
//! ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
