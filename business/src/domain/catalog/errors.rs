#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog.name_empty")]
    NameEmpty,
    #[error("catalog.price_invalid")]
    PriceInvalid,
}
