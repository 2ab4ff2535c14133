//! Scripted in-memory Places service for integration tests
//!
//! Responses are queued per query or place id; anything unscripted falls back
//! to an empty search or a plain details record.

use async_trait::async_trait;
use placefinder_lib::modules::lookup::infrastructure::external::google_places::dto::{
    LocalizedText, PlaceDetailsResponse, PlaceSummary, SearchTextResponse,
};
use placefinder_lib::{LookupError, PlacesApi};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

type SearchReply = Result<SearchTextResponse, LookupError>;
type DetailsReply = Result<PlaceDetailsResponse, LookupError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    Details(String),
}

#[derive(Default)]
pub struct FakePlaces {
    searches: Mutex<HashMap<String, VecDeque<SearchReply>>>,
    details: Mutex<HashMap<String, VecDeque<DetailsReply>>>,
    latency: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<(Call, Instant)>>,
}

impl FakePlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_search(self, query: &str, reply: SearchReply) -> Self {
        self.searches
            .lock()
            .unwrap()
            .entry(query.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn on_details(self, place_id: &str, reply: DetailsReply) -> Self {
        self.details
            .lock()
            .unwrap()
            .entry(place_id.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// Delay every search for `query` by `latency`
    pub fn with_latency(self, query: &str, latency: Duration) -> Self {
        self.latency
            .lock()
            .unwrap()
            .insert(query.to_string(), latency);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        let mut times: Vec<Instant> = self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect();
        times.sort();
        times
    }

    pub fn search_count(&self, query: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == Call::Search(query.to_string()))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push((call, Instant::now()));
    }
}

#[async_trait]
impl PlacesApi for FakePlaces {
    async fn search_text(&self, query: &str, _page_size: usize) -> SearchReply {
        self.record(Call::Search(query.to_string()));

        let latency = self.latency.lock().unwrap().get(query).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        let reply = self
            .searches
            .lock()
            .unwrap()
            .get_mut(query)
            .and_then(|queue| {
                // The last scripted reply repeats
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            });
        reply.unwrap_or_else(|| Ok(SearchTextResponse::default()))
    }

    async fn get_place(&self, place_id: &str, _include_reviews: bool) -> DetailsReply {
        self.record(Call::Details(place_id.to_string()));

        let reply = self
            .details
            .lock()
            .unwrap()
            .get_mut(place_id)
            .and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            });
        reply.unwrap_or_else(|| Ok(details(place_id, 4.5)))
    }
}

pub fn places(entries: &[(&str, &str)]) -> SearchTextResponse {
    SearchTextResponse {
        places: entries
            .iter()
            .map(|(id, name)| PlaceSummary {
                id: Some(id.to_string()),
                display_name: Some(LocalizedText {
                    text: name.to_string(),
                    language_code: None,
                }),
                formatted_address: None,
            })
            .collect(),
    }
}

pub fn details(place_id: &str, rating: f64) -> PlaceDetailsResponse {
    PlaceDetailsResponse {
        id: Some(place_id.to_string()),
        rating: Some(rating),
        user_rating_count: Some(10),
        google_maps_uri: Some(format!("https://maps.google.com/?q={}", place_id)),
        ..Default::default()
    }
}
