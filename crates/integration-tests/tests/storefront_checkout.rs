//! Checkout flows against a running storefront.

use la_reyna_integration_tests::{CUSTOMER_EMAIL, CUSTOMER_PASSWORD, TestContext, location};
use reqwest::{Client, StatusCode};

async fn fill_cart(ctx: &TestContext, client: &Client) {
    let resp = client
        .post(ctx.storefront("/cart/add"))
        .form(&[("key", "prod-frag6"), ("quantity", "2")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

async fn cart_is_empty(ctx: &TestContext, client: &Client) -> bool {
    let html = client
        .get(ctx.storefront("/cart/count"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    html.contains(">0<")
}

#[tokio::test]
async fn test_empty_cart_checkout_redirects_to_cart() {
    let ctx = TestContext::start().await;
    let resp = ctx
        .client()
        .get(ctx.storefront("/checkout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart");
}

#[tokio::test]
async fn test_submit_without_terms_changes_nothing() {
    let ctx = TestContext::start().await;
    let client = ctx.client();
    fill_cart(&ctx, &client).await;

    let resp = client
        .post(ctx.storefront("/checkout/submit"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = resp.text().await.unwrap();
    assert!(page.contains("Debe aceptar los términos y condiciones"));

    // Cart is untouched
    assert!(!cart_is_empty(&ctx, &client).await);
    let page = client
        .get(ctx.storefront("/checkout"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("360.00"));
}

#[tokio::test]
async fn test_guest_checkout_places_order_and_empties_cart() {
    let ctx = TestContext::start().await;
    let client = ctx.client();
    fill_cart(&ctx, &client).await;

    client
        .post(ctx.storefront("/checkout/edit"))
        .send()
        .await
        .unwrap();
    let resp = client
        .post(ctx.storefront("/checkout/contact"))
        .form(&[
            ("full_name", "Rosa Quispe"),
            ("email", "rosa@example.com"),
            ("phone", "987654321"),
            ("address", "Jr. Cusco 220"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/checkout");

    client
        .post(ctx.storefront("/checkout/payment"))
        .form(&[("method", "contraentrega")])
        .send()
        .await
        .unwrap();
    client
        .post(ctx.storefront("/checkout/terms"))
        .form(&[("action", "accept")])
        .send()
        .await
        .unwrap();

    let resp = client
        .post(ctx.storefront("/checkout/submit"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let page = resp.text().await.unwrap();
    assert!(page.contains("Su orden ha sido enviada"));
    assert!(page.contains("Rosa Quispe"));
    assert!(page.contains("Pago contraentrega"));
    assert!(page.contains("360.00"));

    assert!(cart_is_empty(&ctx, &client).await);
}

#[tokio::test]
async fn test_logged_in_checkout_prefills_contact() {
    let ctx = TestContext::start().await;
    let client = ctx.client();

    let resp = client
        .post(ctx.storefront("/auth/login"))
        .form(&[("email", CUSTOMER_EMAIL), ("password", CUSTOMER_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/");

    fill_cart(&ctx, &client).await;
    let page = client
        .get(ctx.storefront("/checkout"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Lucia Mendoza"));
    assert!(page.contains("912345678"));
}

#[tokio::test]
async fn test_logout_clears_checkout_contact() {
    let ctx = TestContext::start().await;
    let client = ctx.client();

    client
        .post(ctx.storefront("/auth/login"))
        .form(&[("email", CUSTOMER_EMAIL), ("password", CUSTOMER_PASSWORD)])
        .send()
        .await
        .unwrap();
    fill_cart(&ctx, &client).await;
    client
        .post(ctx.storefront("/checkout/terms"))
        .form(&[("action", "accept")])
        .send()
        .await
        .unwrap();

    let resp = client
        .post(ctx.storefront("/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/");

    let page = client
        .get(ctx.storefront("/checkout"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!page.contains("Lucia Mendoza"));
    assert!(!page.contains("912345678"));
}
