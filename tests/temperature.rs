use governor::{Quota, RateLimiter};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use nonzero_ext::nonzero;
use room_temperature::error::ApiError;
use room_temperature::sentiment_client::{Sentiment, SentimentClient};
use room_temperature::temperature::take_temperature;
use room_temperature::twitter_client::TwitterClient;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use url::{form_urlencoded, Url};

// base64("key:secret")
const BASIC_AUTH: &str = "Basic a2V5OnNlY3JldA==";
const BEARER_TOKEN: &str = "AAAA-test-token";
const MASHAPE_KEY: &str = "mashape-key";

type RequestLog = Arc<Mutex<Vec<String>>>;

fn json(status: StatusCode, body: String) -> Response<Body> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn header<'a>(req: &'a Request<Body>, name: &str) -> &'a str {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

async fn fake_apis(req: Request<Body>, log: RequestLog) -> Result<Response<Body>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or("").to_string();
    let authorization = header(&req, "Authorization").to_string();
    let mashape_key = header(&req, "X-Mashape-Key").to_string();
    let body = hyper::body::to_bytes(req.into_body()).await.unwrap();
    let form: Vec<(String, String)> = form_urlencoded::parse(&body).into_owned().collect();

    log.lock().unwrap().push(format!("{method} {path}"));

    let resp = match (method, path.as_str()) {
        (Method::POST, "/oauth2/token") => {
            let grant = form.iter().any(|(k, v)| k == "grant_type" && v == "client_credentials");
            if authorization == BASIC_AUTH && grant {
                json(
                    StatusCode::OK,
                    format!(r#"{{"token_type":"bearer","access_token":"{BEARER_TOKEN}"}}"#),
                )
            } else {
                json(StatusCode::FORBIDDEN, r#"{"errors":[{"code":99}]}"#.to_string())
            }
        }
        (Method::GET, "/1.1/search/tweets.json") => {
            let expected_query = "q=yosemite%20-filter%3Aretweets%20-filter%3Areplies&count=10&lang=en&tweet_mode=extended";
            if authorization != format!("Bearer {BEARER_TOKEN}") {
                json(StatusCode::UNAUTHORIZED, "{}".to_string())
            } else if query != expected_query {
                json(StatusCode::BAD_REQUEST, format!(r#"{{"query":"{query}"}}"#))
            } else {
                json(
                    StatusCode::OK,
                    r#"{"statuses": [
                        {"id_str": "1", "full_text": "I love Half Dome at sunrise",
                         "created_at": "Wed Oct 10 20:19:24 +0000 2018",
                         "user": {"name": "Ranger", "screen_name": "ranger"}},
                        {"id_str": "2", "full_text": "I hate the traffic in the valley"},
                        {"id_str": "3", "full_text": "Tioga Road opens\non Friday"}
                    ]}"#
                    .to_string(),
                )
            }
        }
        (Method::POST, "/api/sentiment/") => {
            let language = form.iter().find(|(k, _)| k == "language").map(|(_, v)| v.as_str());
            let text = form.iter().find(|(k, _)| k == "text").map(|(_, v)| v.as_str());
            match (mashape_key == MASHAPE_KEY, language, text) {
                (true, Some("english"), Some(text)) => {
                    let label = if text.contains("love") {
                        "pos"
                    } else if text.contains("hate") {
                        "neg"
                    } else {
                        "neutral"
                    };
                    json(
                        StatusCode::OK,
                        format!(
                            r#"{{"label":"{label}","probability":{{"pos":0.5,"neg":0.3,"neutral":0.2}}}}"#
                        ),
                    )
                }
                (false, _, _) => json(StatusCode::FORBIDDEN, "{}".to_string()),
                _ => json(StatusCode::BAD_REQUEST, "{}".to_string()),
            }
        }
        _ => json(StatusCode::NOT_FOUND, "{}".to_string()),
    };
    Ok(resp)
}

async fn spawn_fake_apis() -> (Url, RequestLog) {
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let make_svc = {
        let log = log.clone();
        make_service_fn(move |_conn| {
            let log = log.clone();
            async move { Ok::<_, Infallible>(service_fn(move |req| fake_apis(req, log.clone()))) }
        })
    };

    let addr: SocketAddr = ([127, 0, 0, 1], 0).into();
    let server = Server::bind(&addr).serve(make_svc);
    let base = Url::parse(&format!("http://{}", server.local_addr())).unwrap();
    tokio::spawn(server);
    (base, log)
}

#[tokio::test]
async fn test_take_temperature() {
    let (base, log) = spawn_fake_apis().await;

    let mut twitter_client = TwitterClient::new("key", "secret", &base);
    twitter_client.authorize().await.unwrap();
    assert!(twitter_client.is_authorized());

    let sentiment_client =
        SentimentClient::new(&base.join("/api/sentiment/").unwrap(), MASHAPE_KEY, "english");
    let limiter = RateLimiter::direct(Quota::per_second(nonzero!(1000u32)));

    let reading = take_temperature(&twitter_client, &sentiment_client, &limiter, "yosemite")
        .await
        .unwrap();

    let sentiments: Vec<Sentiment> = reading
        .tweets
        .iter()
        .map(|classified| classified.classification.sentiment.clone())
        .collect();
    assert_eq!(
        sentiments,
        vec![Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
    );
    assert_eq!(reading.tweets[2].tweet.full_text, "Tioga Road opens\non Friday");
    assert_eq!(reading.dominant(), None);

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "POST /oauth2/token",
            "GET /1.1/search/tweets.json",
            "POST /api/sentiment/",
            "POST /api/sentiment/",
            "POST /api/sentiment/",
        ]
    );
}

#[tokio::test]
async fn test_rejected_credentials() {
    let (base, _log) = spawn_fake_apis().await;
    let mut twitter_client = TwitterClient::new("key", "wrong", &base);
    assert!(twitter_client.authorize().await.is_err());
    assert!(!twitter_client.is_authorized());
}

#[tokio::test]
async fn test_sentiment_error_status_is_reported() {
    let (base, log) = spawn_fake_apis().await;

    let mut twitter_client = TwitterClient::new("key", "secret", &base);
    twitter_client.authorize().await.unwrap();
    let sentiment_client =
        SentimentClient::new(&base.join("/api/sentiment/").unwrap(), "bad-key", "english");
    let limiter = RateLimiter::direct(Quota::per_second(nonzero!(1000u32)));

    let err = take_temperature(&twitter_client, &sentiment_client, &limiter, "yosemite")
        .await
        .unwrap_err();

    let status = err
        .chain()
        .find_map(|cause| match cause.downcast_ref::<ApiError>() {
            Some(ApiError::Status { status, .. }) => Some(*status),
            _ => None,
        });
    assert_eq!(status, Some(StatusCode::FORBIDDEN));

    // Stops at the first failure.
    assert_eq!(log.lock().unwrap().len(), 3);
}
