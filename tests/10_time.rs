mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn time_endpoint_responds() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/time", server.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.text().await?;
    assert!(body.starts_with("The current time is: "), "unexpected body: {}", body);
    assert!(body.ends_with('\n'));
    Ok(())
}

#[tokio::test]
async fn time_ignores_request_body() -> Result<()> {
    let server = common::spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/time", server.base_url))
        .body("not json at all")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}
