//! Back-office login and list maintenance against a running admin.

use la_reyna_integration_tests::{
    ADMIN_EMAIL, CUSTOMER_EMAIL, CUSTOMER_PASSWORD, TestContext, location,
};
use reqwest::{Client, StatusCode};

async fn page(ctx: &TestContext, client: &Client, path: &str) -> String {
    let resp = client.get(ctx.admin(path)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK, "{path}");
    resp.text().await.unwrap()
}

fn product_form<'a>(code: &'a str, name: &'a str, price: &'a str) -> [(&'static str, &'a str); 6] {
    [
        ("code", code),
        ("name", name),
        ("category", "Perfumes"),
        ("brand", "Dior"),
        ("sex", "Femenino"),
        ("price", price),
    ]
}

#[tokio::test]
async fn test_unauthenticated_admin_redirects_to_login() {
    let ctx = TestContext::start().await;
    let resp = ctx.client().get(ctx.admin("/products")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/auth/login");
}

#[tokio::test]
async fn test_customer_account_cannot_enter_admin() {
    let ctx = TestContext::start().await;
    let client = ctx.client();
    let resp = client
        .post(ctx.admin("/auth/login"))
        .form(&[("email", CUSTOMER_EMAIL), ("password", CUSTOMER_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Acceso restringido a administradores"));

    let resp = client.get(ctx.admin("/")).send().await.unwrap();
    assert_eq!(location(&resp), "/auth/login");
}

#[tokio::test]
async fn test_dashboard_after_login() {
    let ctx = TestContext::start().await;
    let client = ctx.admin_client().await;

    let html = page(&ctx, &client, "/").await;
    assert!(html.contains("Bienvenido, Administrador"));
    assert!(html.contains("6 registrados"));
    assert!(html.contains("3 registrados"));
    assert!(html.contains(ADMIN_EMAIL));

    // Logout ends the session
    let resp = client.post(ctx.admin("/auth/logout")).send().await.unwrap();
    assert_eq!(location(&resp), "/auth/login");
    let resp = client.get(ctx.admin("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_duplicate_product_code_rejected_and_list_unchanged() {
    let ctx = TestContext::start().await;
    let client = ctx.admin_client().await;

    let resp = client
        .post(ctx.admin("/products"))
        .form(&product_form("P001", "Impostor Eau de Parfum", "99"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Este código ya existe"));

    let list = page(&ctx, &client, "/products").await;
    assert!(!list.contains("Impostor Eau de Parfum"));
    assert!(list.contains("Set Ccori Rosé"));
}

#[tokio::test]
async fn test_product_add_edit_delete_save() {
    let ctx = TestContext::start().await;
    let client = ctx.admin_client().await;

    let resp = client
        .post(ctx.admin("/products"))
        .form(&product_form("P007", "J'adore Eau de Parfum", "210.50"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/products");
    let list = page(&ctx, &client, "/products").await;
    assert!(list.contains("Producto agregado"));
    assert!(list.contains("P007"));
    assert!(list.contains("210.50"));
    assert!(list.contains("Última grabación: 6 registros"));

    // Seed products have no brand, so the edit form must supply one
    let resp = client
        .post(ctx.admin("/products/P002/edit"))
        .form(&product_form("IGNORED", "Cielo en Rosa Intense", "125"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/products/P002");
    let detail = page(&ctx, &client, "/products/P002").await;
    assert!(detail.contains("Cielo en Rosa Intense"));
    assert!(detail.contains("Dior"));

    let confirm = page(&ctx, &client, "/products/P003/delete").await;
    assert!(confirm.contains("Sauvage"));
    let resp = client
        .post(ctx.admin("/products/P003/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/products");
    let resp = client.get(ctx.admin("/products/P003")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    client.post(ctx.admin("/products/save")).send().await.unwrap();
    let list = page(&ctx, &client, "/products").await;
    assert!(list.contains("Cambios guardados con éxito"));

    client.post(ctx.admin("/products/save")).send().await.unwrap();
    let list = page(&ctx, &client, "/products").await;
    assert!(list.contains("No hay cambios pendientes"));
}

#[tokio::test]
async fn test_save_moves_last_saved_count() {
    let ctx = TestContext::start().await;
    let client = ctx.admin_client().await;

    client
        .post(ctx.admin("/products"))
        .form(&product_form("P007", "J'adore Eau de Parfum", "210.50"))
        .send()
        .await
        .unwrap();
    let list = page(&ctx, &client, "/products").await;
    assert!(list.contains("Hay cambios sin guardar"));
    assert!(list.contains("Última grabación: 6 registros"));

    client.post(ctx.admin("/products/save")).send().await.unwrap();
    let list = page(&ctx, &client, "/products").await;
    assert!(!list.contains("Hay cambios sin guardar"));
    assert!(list.contains("Última grabación: 7 registros"));

    let list = page(&ctx, &client, "/customers").await;
    assert!(list.contains("Última grabación: 3 registros"));
}

#[tokio::test]
async fn test_product_validation_rerenders_form() {
    let ctx = TestContext::start().await;
    let client = ctx.admin_client().await;

    let resp = client
        .post(ctx.admin("/products"))
        .form(&product_form("P100", "", "0"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await.unwrap();
    assert!(html.contains("El nombre es requerido"));
    assert!(html.contains("El precio debe ser mayor a 0"));
}

#[tokio::test]
async fn test_product_search_and_category_filter() {
    let ctx = TestContext::start().await;
    let client = ctx.admin_client().await;

    let resp = client
        .get(ctx.admin("/products/search?code=P004"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/products/P004");

    let html = page(&ctx, &client, "/products/search?code=P999").await;
    assert!(html.contains("No se encontró ningún producto con ese código"));

    let html = page(&ctx, &client, "/products?category=Joyas").await;
    assert!(!html.contains("P001"));
    let html = page(&ctx, &client, "/products?category=Perfumes").await;
    assert!(html.contains("P006"));
}

#[tokio::test]
async fn test_customer_maintenance() {
    let ctx = TestContext::start().await;
    let client = ctx.admin_client().await;

    let resp = client
        .post(ctx.admin("/customers"))
        .form(&[
            ("code", "004"),
            ("first_name", "Rosa"),
            ("last_name", "Quispe"),
            ("email", "rosa@example.com"),
            ("address", "Jr. Cusco 220"),
            ("phone", "987654321"),
            ("orders", ""),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/customers");

    let html = page(&ctx, &client, "/customers?q=quispe").await;
    assert!(html.contains("Rosa"));
    assert!(!html.contains("Mariano"));

    // Quick search only narrows the view
    let html = page(&ctx, &client, "/customers").await;
    assert!(html.contains("Mariano"));

    let resp = client
        .post(ctx.admin("/customers"))
        .form(&[
            ("code", "001"),
            ("first_name", "Otro"),
            ("last_name", "Cliente"),
            ("email", "not-an-email"),
            ("address", "x"),
            ("phone", "12"),
        ])
        .send()
        .await
        .unwrap();
    let html = resp.text().await.unwrap();
    assert!(html.contains("El formato de email no es válido"));
    assert!(html.contains("El celular debe tener 9 dígitos"));

    let resp = client
        .post(ctx.admin("/customers/002/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/customers");
    let html = page(&ctx, &client, "/customers").await;
    assert!(html.contains("Cliente Jorge Ramirez eliminado"));
}
