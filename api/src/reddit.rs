/// Wire types for Reddit listing endpoints.
/// Endpoint: https://www.reddit.com/r/nba/{hot,new}.json?limit=100
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct Listing {
    #[serde(default)]
    pub data: ListingData,
}

impl Listing {
    pub fn into_posts(self) -> Vec<Post> {
        self.data.children.into_iter().map(|c| c.data).collect()
    }
}

#[derive(Deserialize, Default, Debug)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<PostEnvelope>,
}

#[derive(Deserialize, Default, Debug)]
pub struct PostEnvelope {
    pub data: Post,
}

#[derive(Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub ups: i64,
    #[serde(default)]
    pub num_comments: u64,
    #[serde(default)]
    pub permalink: String,
    /// Empty string for link posts.
    #[serde(default)]
    pub selftext: String,
    /// Unix seconds; Reddit sends it as a float.
    #[serde(default)]
    pub created_utc: f64,
}
