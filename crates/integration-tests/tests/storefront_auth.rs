//! Login and registration against the mock backend.

use la_reyna_integration_tests::{
    ADMIN_EMAIL, ADMIN_PASSWORD, CUSTOMER_EMAIL, CUSTOMER_PASSWORD, TestContext, location,
};
use reqwest::StatusCode;

#[tokio::test]
async fn test_customer_login_greets_on_next_page() {
    let ctx = TestContext::start().await;
    let client = ctx.client();

    let resp = client
        .post(ctx.storefront("/auth/login"))
        .form(&[("email", CUSTOMER_EMAIL), ("password", CUSTOMER_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let home = client
        .get(ctx.storefront("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(home.contains("Bienvenido, Lucia Mendoza"));

    // The alert is shown once
    let home = client
        .get(ctx.storefront("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!home.contains("Bienvenido, Lucia Mendoza"));
}

#[tokio::test]
async fn test_wrong_password_shows_backend_message() {
    let ctx = TestContext::start().await;
    let resp = ctx
        .client()
        .post(ctx.storefront("/auth/login"))
        .form(&[("email", CUSTOMER_EMAIL), ("password", "nope")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Credenciales incorrectas"));
}

#[tokio::test]
async fn test_admin_login_is_sent_to_back_office() {
    let ctx = TestContext::start().await;
    let resp = ctx
        .client()
        .post(ctx.storefront("/auth/login"))
        .form(&[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), ctx.admin_url);
}

#[tokio::test]
async fn test_register_then_login() {
    let ctx = TestContext::start().await;
    let client = ctx.client();
    let form = [
        ("full_name", "Jorge Ramirez"),
        ("email", "jorge@example.com"),
        ("password", "s3cret"),
        ("phone", "965432187"),
        ("address", "Jr. Los Jardines 456"),
    ];

    let resp = client
        .post(ctx.storefront("/auth/register"))
        .form(&form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Usuario creado con éxito"));

    // A second registration with the same email is refused by the backend
    let page = client
        .post(ctx.storefront("/auth/register"))
        .form(&form)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Error en el registro"));

    let resp = client
        .post(ctx.storefront("/auth/login"))
        .form(&[("email", "jorge@example.com"), ("password", "s3cret")])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/");
}

#[tokio::test]
async fn test_invalid_registration_never_reaches_backend() {
    let ctx = TestContext::start().await;
    let page = ctx
        .client()
        .post(ctx.storefront("/auth/register"))
        .form(&[
            ("full_name", "Ana"),
            ("email", "ana@example.com"),
            ("password", "pw"),
            ("phone", "123"),
            ("address", ""),
        ])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!page.contains("Usuario creado"));
    assert!(page.contains("exactamente 9 dígitos numéricos"));
}
