//! Integration tests for net crate

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use retrofit_errors::{ConfigError, Error, NetworkError};
    use retrofit_net::{fetch_bytes, fetch_plist, NetClient};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Doc {
        #[serde(rename = "Greeting")]
        greeting: String,
    }

    #[tokio::test]
    async fn test_fetch_bytes() {
        let server = MockServer::start();
        let content = b"test file content";
        let mock = server.mock(|when, then| {
            when.method(GET).path("/blob");
            then.status(200).body(content);
        });

        let client = NetClient::with_defaults().unwrap();
        let bytes = fetch_bytes(&client, &server.url("/blob")).await.unwrap();

        mock.assert();
        assert_eq!(bytes, content);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let client = NetClient::with_defaults().unwrap();
        let err = fetch_bytes(&client, &server.url("/missing"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Network(NetworkError::HttpError { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let client = NetClient::with_defaults().unwrap();
        let err = fetch_bytes(&client, "not a url").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Network(NetworkError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_plist_typed() {
        let server = MockServer::start();
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>Greeting</key>
    <string>hello</string>
</dict>
</plist>"#;
        server.mock(|when, then| {
            when.method(GET).path("/doc.plist");
            then.status(200).body(body);
        });

        let client = NetClient::with_defaults().unwrap();
        let doc: Doc = fetch_plist(&client, &server.url("/doc.plist"))
            .await
            .unwrap();
        assert_eq!(doc.greeting, "hello");
    }

    #[tokio::test]
    async fn test_fetch_plist_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/junk.plist");
            then.status(200).body("this is not a plist");
        });

        let client = NetClient::with_defaults().unwrap();
        let err = fetch_plist::<Doc>(&client, &server.url("/junk.plist"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::ParseError { .. })
        ));
    }
}
