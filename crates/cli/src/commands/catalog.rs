//! Catalog inspection commands.

use la_reyna_backend::BackendClient;

use super::CommandError;

/// Log every product the backend serves.
///
/// # Errors
///
/// Returns `CommandError::Backend` if the product list cannot be fetched.
pub async fn list(client: &BackendClient) -> Result<usize, CommandError> {
    let products = client.get_products().await?;

    if products.is_empty() {
        tracing::warn!("The backend has no products");
    }
    for product in &products {
        tracing::info!(
            "{:>4}  {:<32}  S/ {:>8.2}  categoría {}",
            product.id,
            product.name,
            product.price,
            product
                .category
                .map_or_else(|| "-".to_owned(), |c| c.to_string()),
        );
    }
    tracing::info!("{} products", products.len());

    Ok(products.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Json, Router, routing::get};
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_list_counts_products() {
        let app = Router::new().route(
            "/api/productos",
            get(|| async {
                Json(json!([
                    {"id_producto": 1, "nombre_producto": "Cielo en Rosa", "precio": 113.0},
                    {"id_producto": 2, "nombre_producto": "Ocean Breeze", "precio": 155.5, "categoria": 2}
                ]))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = BackendClient::new(&format!("http://{addr}"));
        assert_eq!(list(&client).await.unwrap(), 2);
    }
}
