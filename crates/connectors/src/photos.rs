//! Photo lookups: Pexels is the primary provider, Unsplash the fallback.
//! Both are optional; with no key (or both providers down) every query
//! resolves to an empty list.

use api_types::photo::PhotoView;
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_PLACE_COUNT: u8 = 5;
const DESTINATION_COUNT: u8 = 8;
const DEFAULT_RANDOM_COUNT: u8 = 10;

#[derive(Clone, Debug)]
pub struct PhotoClient {
    client: Client,
    pexels_url: String,
    pexels_key: Option<String>,
    unsplash_url: String,
    unsplash_key: Option<String>,
}

#[derive(Deserialize)]
struct PexelsSearch {
    photos: Option<Vec<PexelsPhoto>>,
}

#[derive(Deserialize)]
struct PexelsPhoto {
    id: u64,
    src: PexelsSrc,
    alt: Option<String>,
    photographer: String,
    photographer_url: Option<String>,
}

#[derive(Deserialize)]
struct PexelsSrc {
    large: String,
    medium: String,
}

#[derive(Deserialize)]
struct UnsplashSearch {
    results: Option<Vec<UnsplashPhoto>>,
}

#[derive(Deserialize)]
struct UnsplashPhoto {
    id: String,
    urls: UnsplashUrls,
    alt_description: Option<String>,
    user: UnsplashUser,
}

#[derive(Deserialize)]
struct UnsplashUrls {
    regular: String,
    thumb: String,
}

#[derive(Deserialize)]
struct UnsplashUser {
    name: String,
    links: Option<UnsplashUserLinks>,
}

#[derive(Deserialize)]
struct UnsplashUserLinks {
    html: Option<String>,
}

impl PhotoClient {
    pub fn new(
        client: Client,
        pexels_url: String,
        pexels_key: Option<String>,
        unsplash_url: String,
        unsplash_key: Option<String>,
    ) -> Self {
        Self {
            client,
            pexels_url,
            pexels_key: pexels_key.filter(|k| !k.is_empty()),
            unsplash_url,
            unsplash_key: unsplash_key.filter(|k| !k.is_empty()),
        }
    }

    /// Photos of a single tourist place.
    pub async fn place_images(&self, place_name: &str, count: Option<u8>) -> Vec<PhotoView> {
        let query = format!("{place_name} tourist spot india landmark monument");
        self.search(&query, count.unwrap_or(DEFAULT_PLACE_COUNT))
            .await
    }

    /// Photos of a destination, optionally narrowed to a category
    /// ("beach", "food", ...).
    pub async fn destination_images(
        &self,
        destination: &str,
        category: Option<&str>,
    ) -> Vec<PhotoView> {
        let query = match category {
            Some(category) => format!("{destination} {category} India"),
            None => format!("{destination} tourism India"),
        };
        self.search(&query, DESTINATION_COUNT).await
    }

    /// Generic travel imagery for the landing page.
    pub async fn random_travel_images(&self, count: Option<u8>) -> Vec<PhotoView> {
        self.search("India travel tourism", count.unwrap_or(DEFAULT_RANDOM_COUNT))
            .await
    }

    async fn search(&self, query: &str, count: u8) -> Vec<PhotoView> {
        let from_pexels = self.search_pexels(query, count).await;
        if !from_pexels.is_empty() {
            return from_pexels;
        }
        self.search_unsplash(query, count).await
    }

    async fn search_pexels(&self, query: &str, count: u8) -> Vec<PhotoView> {
        let Some(key) = &self.pexels_key else {
            return Vec::new();
        };

        let request = self
            .client
            .get(format!("{}/search", self.pexels_url.trim_end_matches('/')))
            .query(&[
                ("query", query),
                ("per_page", &count.to_string()),
                ("orientation", "landscape"),
            ])
            .header("Authorization", key);

        let photos = match request.send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<PexelsSearch>().await {
                    Ok(search) => search.photos.unwrap_or_default(),
                    Err(err) => {
                        tracing::error!(%err, "pexels response did not parse");
                        return Vec::new();
                    }
                }
            }
            Ok(response) => {
                tracing::error!(status = %response.status(), "pexels search failed");
                return Vec::new();
            }
            Err(err) => {
                tracing::error!(%err, "pexels request failed");
                return Vec::new();
            }
        };

        photos
            .into_iter()
            .map(|photo| PhotoView {
                id: photo.id.to_string(),
                url: photo.src.large,
                thumb_url: photo.src.medium,
                alt: photo.alt.filter(|a| !a.is_empty()).unwrap_or_else(|| query.to_string()),
                photographer: photo.photographer,
                photographer_url: photo.photographer_url,
            })
            .collect()
    }

    async fn search_unsplash(&self, query: &str, count: u8) -> Vec<PhotoView> {
        let Some(key) = &self.unsplash_key else {
            return Vec::new();
        };

        let request = self
            .client
            .get(format!(
                "{}/search/photos",
                self.unsplash_url.trim_end_matches('/')
            ))
            .query(&[
                ("query", query),
                ("per_page", &count.to_string()),
                ("orientation", "landscape"),
            ])
            .header("Authorization", format!("Client-ID {key}"));

        let results = match request.send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<UnsplashSearch>().await {
                    Ok(search) => search.results.unwrap_or_default(),
                    Err(err) => {
                        tracing::error!(%err, "unsplash response did not parse");
                        return Vec::new();
                    }
                }
            }
            Ok(response) => {
                tracing::error!(status = %response.status(), "unsplash search failed");
                return Vec::new();
            }
            Err(err) => {
                tracing::error!(%err, "unsplash request failed");
                return Vec::new();
            }
        };

        results
            .into_iter()
            .map(|photo| PhotoView {
                id: photo.id,
                url: photo.urls.regular,
                thumb_url: photo.urls.thumb,
                alt: photo
                    .alt_description
                    .filter(|a| !a.is_empty())
                    .unwrap_or_else(|| query.to_string()),
                photographer: photo.user.name,
                photographer_url: photo.user.links.and_then(|l| l.html),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pexels_body() -> serde_json::Value {
        serde_json::json!({
            "photos": [{
                "id": 42,
                "src": { "large": "https://p.example/l.jpg", "medium": "https://p.example/m.jpg" },
                "alt": "Gateway of India at dusk",
                "photographer": "Asha",
                "photographer_url": "https://p.example/asha"
            }]
        })
    }

    fn unsplash_body() -> serde_json::Value {
        serde_json::json!({
            "results": [{
                "id": "u-1",
                "urls": { "regular": "https://u.example/r.jpg", "thumb": "https://u.example/t.jpg" },
                "alt_description": null,
                "user": { "name": "Ravi", "links": { "html": "https://u.example/ravi" } }
            }]
        })
    }

    fn client_for(server: &MockServer) -> PhotoClient {
        PhotoClient::new(
            Client::new(),
            server.uri(),
            Some("pexels-key".to_string()),
            server.uri(),
            Some("unsplash-key".to_string()),
        )
    }

    #[tokio::test]
    async fn pexels_is_the_primary_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(header("Authorization", "pexels-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pexels_body()))
            .mount(&server)
            .await;

        let photos = client_for(&server).place_images("Gateway of India", None).await;
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].id, "42");
        assert_eq!(photos[0].url, "https://p.example/l.jpg");
        assert_eq!(photos[0].photographer, "Asha");
    }

    #[tokio::test]
    async fn unsplash_covers_a_pexels_outage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search/photos"))
            .and(header("Authorization", "Client-ID unsplash-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(unsplash_body()))
            .mount(&server)
            .await;

        let photos = client_for(&server).destination_images("Goa", Some("beach")).await;
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].id, "u-1");
        // missing alt text falls back to the query
        assert_eq!(photos[0].alt, "Goa beach India");
        assert_eq!(
            photos[0].photographer_url.as_deref(),
            Some("https://u.example/ravi")
        );
    }

    #[tokio::test]
    async fn both_providers_down_means_no_photos() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let photos = client_for(&server).random_travel_images(None).await;
        assert!(photos.is_empty());
    }

    #[tokio::test]
    async fn no_keys_means_no_requests() {
        let client = PhotoClient::new(
            Client::new(),
            "http://127.0.0.1:1".to_string(),
            None,
            "http://127.0.0.1:1".to_string(),
            None,
        );
        assert!(client.place_images("Hampi", Some(3)).await.is_empty());
    }
}
