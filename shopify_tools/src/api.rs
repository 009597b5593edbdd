use std::sync::Arc;

use graphql_parser::parse_query;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use subscription_engine::{CustomerLookup, SubscriptionApiError};

use crate::{config::ShopifyConfig, ShopifyApiError};

/// A client for the storefront's Admin GraphQL API.
#[derive(Clone)]
pub struct ShopifyApi {
    config: ShopifyConfig,
    client: Arc<Client>,
}

impl std::fmt::Debug for ShopifyApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ShopifyApi ({}, {})", self.config.shop, self.config.api_version)
    }
}

const CUSTOMER_EMAIL: &str = "query CustomerEmail($id: ID!) { customer(id: $id) { email } }";

impl ShopifyApi {
    pub fn new(config: ShopifyConfig) -> Result<Self, ShopifyApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(config.admin_access_token.reveal().as_str())
            .map_err(|e| ShopifyApiError::Initialization(e.to_string()))?;
        headers.insert("X-Shopify-Access-Token", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ShopifyApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn graphql_query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<T, ShopifyApiError> {
        let query = parse_query::<String>(query).map_err(|e| ShopifyApiError::InvalidGraphQL(e.to_string()))?;
        let mut body = serde_json::json!({
            "query": query.to_string(),
        });
        if let Some(vars) = variables {
            body["variables"] = vars;
        }
        trace!("🛍️️ Sending GraphQL query: {body}");
        let response = self
            .client
            .post(self.url("/graphql.json"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ShopifyApiError::RequestError(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| ShopifyApiError::ResponseError(e.to_string()))?;
            return Err(ShopifyApiError::QueryError { status, message });
        }
        let result = response.json::<Value>().await.map_err(|e| ShopifyApiError::JsonError(e.to_string()))?;
        extract_data(result)
    }

    pub fn url(&self, path: &str) -> String {
        format!("https://{}/admin/api/{}{path}", self.config.shop, self.config.api_version)
    }

    /// Fetches a customer's e-mail address. `customer_id` is the numeric id the storefront hands out.
    pub async fn fetch_customer_email(&self, customer_id: &str) -> Result<Option<String>, ShopifyApiError> {
        let variables = serde_json::json!({ "id": customer_gid(customer_id) });
        debug!("🛍️️ Fetching e-mail address for customer {customer_id}");
        let response = self.graphql_query::<CustomerResponse>(CUSTOMER_EMAIL, Some(variables)).await?;
        Ok(response.customer.and_then(|c| c.email))
    }
}

#[derive(Deserialize)]
struct CustomerResponse {
    customer: Option<CustomerEmail>,
}

#[derive(Deserialize)]
struct CustomerEmail {
    email: Option<String>,
}

fn customer_gid(customer_id: &str) -> String {
    format!("gid://shopify/Customer/{customer_id}")
}

fn extract_data<T: DeserializeOwned>(result: Value) -> Result<T, ShopifyApiError> {
    if let Some(errors) = result["errors"].as_array() {
        let e = errors.iter().map(|e| e.to_string()).collect::<Vec<String>>().join(", ");
        return Err(ShopifyApiError::GraphQLError(e));
    }
    let data = result["data"].clone();
    let costs = result["extensions"]["cost"].clone();
    trace!("🛍️️ GraphQL response: {data}");
    trace!("🛍️️ GraphQL costs: {costs}");
    if data.is_null() {
        return Err(ShopifyApiError::EmptyResponse);
    }
    serde_json::from_value(data).map_err(|e| ShopifyApiError::JsonError(e.to_string()))
}

impl CustomerLookup for ShopifyApi {
    async fn customer_email(&self, customer_id: &str) -> Result<Option<String>, SubscriptionApiError> {
        Ok(self.fetch_customer_email(customer_id).await?)
    }
}
