//! Cart flows against a running storefront.

use la_reyna_integration_tests::{TestContext, location};
use reqwest::{Client, StatusCode};

async fn add(ctx: &TestContext, client: &Client, key: &str, quantity: u32) {
    let resp = client
        .post(ctx.storefront("/cart/add"))
        .form(&[("key", key), ("quantity", &quantity.to_string())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart");
}

async fn count(ctx: &TestContext, client: &Client) -> String {
    let html = client
        .get(ctx.storefront("/cart/count"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let start = html.find('>').unwrap() + 1;
    let end = html.rfind("</span>").unwrap();
    html[start..end].trim().to_string()
}

#[tokio::test]
async fn test_repeated_adds_merge_into_one_line() {
    let ctx = TestContext::start().await;
    let client = ctx.client();

    add(&ctx, &client, "cielo-rosa", 1).await;
    add(&ctx, &client, "cielo-rosa", 2).await;
    add(&ctx, &client, "ccori-rose", 1).await;
    assert_eq!(count(&ctx, &client).await, "4");

    let page = client
        .get(ctx.storefront("/cart"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    // 3 x 113 on the merged line, 339 + 119 overall
    assert!(page.contains("339.00"));
    assert!(page.contains("458.00"));
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let ctx = TestContext::start().await;
    let alice = ctx.client();
    let bob = ctx.client();

    add(&ctx, &alice, "cielo-rosa", 2).await;
    assert_eq!(count(&ctx, &alice).await, "2");
    assert_eq!(count(&ctx, &bob).await, "0");
}

#[tokio::test]
async fn test_zero_quantity_update_is_ignored_and_remove_works() {
    let ctx = TestContext::start().await;
    let client = ctx.client();
    add(&ctx, &client, "cielo-rosa", 2).await;
    add(&ctx, &client, "sauvage-dior", 1).await;

    let resp = client
        .post(ctx.storefront("/cart/update"))
        .form(&[("index", "0"), ("quantity", "0")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(count(&ctx, &client).await, "3");

    client
        .post(ctx.storefront("/cart/remove"))
        .form(&[("index", "1")])
        .send()
        .await
        .unwrap();
    assert_eq!(count(&ctx, &client).await, "2");
}

#[tokio::test]
async fn test_promo_code_discounts_total_only_once_applied() {
    let ctx = TestContext::start().await;
    let client = ctx.client();
    add(&ctx, &client, "cielo-rosa", 1).await;

    let page = client
        .post(ctx.storefront("/cart/promo"))
        .form(&[("code", "PROMO10")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Código promocional aplicado con éxito"));
    assert!(page.contains("103.00"));

    let page = client
        .post(ctx.storefront("/cart/promo"))
        .form(&[("code", "PROMO20")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Código promocional inválido"));
    assert!(!page.contains("103.00"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let ctx = TestContext::start().await;
    let resp = ctx
        .client()
        .post(ctx.storefront("/cart/add"))
        .form(&[("key", "no-such-perfume")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
