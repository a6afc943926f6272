//! Catalog records, their locale projection, and their display order.

mod normalize;
mod record;
mod sort;

pub use normalize::{normalize, normalize_all, parse_images, project_spec, project_specs};
pub use record::{NormalizedCatalogRecord, RawCatalogRecord, SpecValue, Translation};
pub use sort::{
    classify, natural_cmp, rules, sort_records, Classification, GroupRule, Matcher, SortGroup,
    OP_SIZE_ORDER,
};
