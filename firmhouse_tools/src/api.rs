use std::{fmt::Debug, sync::Arc};

use graphql_parser::parse_query;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};
use serde_json::Value;
use subscription_engine::{
    subscription_types::{DiscountCode, NewOrderedProduct, NewSubscription, OrderedProductUpdate},
    SubscriptionApiError,
    SubscriptionManagement,
};

use crate::{config::FirmhouseConfig, queries, FirmhouseApiError};

const SUBSCRIPTION_TOKEN_HEADER: &str = "X-Subscription-Token";

#[derive(Clone)]
pub struct FirmhouseApi {
    config: FirmhouseConfig,
    client: Arc<Client>,
}

impl Debug for FirmhouseApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FirmhouseApi ({})", self.config.graphql_url)
    }
}

impl FirmhouseApi {
    pub fn new(config: FirmhouseConfig) -> Result<Self, FirmhouseApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(config.project_access_token.reveal().as_str())
            .map_err(|e| FirmhouseApiError::Initialization(e.to_string()))?;
        headers.insert("X-Project-Access-Token", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FirmhouseApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &FirmhouseConfig {
        &self.config
    }

    /// Sends a GraphQL request and returns the complete response document (`data`, and `errors` if there are any)
    /// without interpreting it. Only non-2xx responses are treated as errors.
    ///
    /// If `subscription_token` is given, the request acts on behalf of that subscription.
    pub async fn graphql_request(
        &self,
        query: &str,
        variables: Value,
        subscription_token: Option<&str>,
    ) -> Result<Value, FirmhouseApiError> {
        let body = request_body(query, variables)?;
        trace!("📦️ Sending GraphQL query: {body}");
        let mut req = self.client.post(&self.config.graphql_url).json(&body);
        if let Some(token) = subscription_token {
            req = req.header(SUBSCRIPTION_TOKEN_HEADER, token);
        }
        let response = req.send().await.map_err(|e| FirmhouseApiError::RequestError(e.to_string()))?;
        if response.status().is_success() {
            trace!("📦️ GraphQL query successful. {}", response.status());
            response.json::<Value>().await.map_err(|e| FirmhouseApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| FirmhouseApiError::ResponseError(e.to_string()))?;
            Err(FirmhouseApiError::QueryError { status, message })
        }
    }

    /// Like [`Self::graphql_request`], but fails if the response carries GraphQL errors, and returns only `data`.
    pub async fn graphql_data(&self, query: &str, variables: Value) -> Result<Value, FirmhouseApiError> {
        let result = self.graphql_request(query, variables, None).await?;
        data_or_errors(result)
    }
}

fn request_body(query: &str, variables: Value) -> Result<Value, FirmhouseApiError> {
    let query = parse_query::<String>(query).map_err(|e| FirmhouseApiError::InvalidGraphQL(e.to_string()))?;
    Ok(serde_json::json!({
        "query": query.to_string(),
        "variables": variables,
    }))
}

fn data_or_errors(mut result: Value) -> Result<Value, FirmhouseApiError> {
    if let Some(errors) = result["errors"].as_array().filter(|e| !e.is_empty()) {
        let e = errors.iter().map(|e| e["message"].as_str().unwrap_or("unknown error")).collect::<Vec<_>>().join(", ");
        return Err(FirmhouseApiError::GraphQLError(e));
    }
    Ok(result["data"].take())
}

fn discount_from_data(data: &Value) -> Result<Option<DiscountCode>, FirmhouseApiError> {
    let code = &data["getDiscountCode"];
    if code.is_null() {
        return Ok(None);
    }
    serde_json::from_value(code.clone()).map(Some).map_err(|e| FirmhouseApiError::JsonError(e.to_string()))
}

fn promotion_errors(data: &Value) -> Vec<String> {
    data["applyPromotionToSubscription"]["errors"]
        .as_array()
        .map(|errors| errors.iter().map(|e| e["message"].as_str().unwrap_or("unknown error").to_string()).collect())
        .unwrap_or_default()
}

impl SubscriptionManagement for FirmhouseApi {
    async fn subscriptions_for_email(&self, email: &str) -> Result<Value, SubscriptionApiError> {
        let query = queries::subscriptions_for_email();
        Ok(self.graphql_request(&query, queries::email_variables(email), None).await?)
    }

    async fn fetch_subscription(&self, token: &str) -> Result<Value, SubscriptionApiError> {
        let query = queries::get_subscription();
        Ok(self.graphql_request(&query, queries::token_variables(token), None).await?)
    }

    async fn update_ordered_product(&self, update: &OrderedProductUpdate) -> Result<Value, SubscriptionApiError> {
        let query = queries::update_ordered_product();
        let token = update.subscription_token.as_deref();
        Ok(self.graphql_request(&query, queries::update_variables(update), token).await?)
    }

    async fn create_ordered_product(&self, product: &NewOrderedProduct) -> Result<Value, SubscriptionApiError> {
        let query = match product.subscription_id {
            Some(_) => queries::ADD_TO_SUBSCRIPTION,
            None => queries::CREATE_ORDERED_PRODUCT,
        };
        let variables = queries::create_ordered_product_variables(product);
        Ok(self.graphql_request(query, variables, product.subscription_token.as_deref()).await?)
    }

    async fn destroy_ordered_product(&self, id: &str) -> Result<Value, SubscriptionApiError> {
        Ok(self.graphql_request(queries::DESTROY_ORDERED_PRODUCT, queries::destroy_variables(id), None).await?)
    }

    async fn fetch_discount_code(&self, code: &str) -> Result<Option<DiscountCode>, SubscriptionApiError> {
        let data = self.graphql_data(queries::GET_DISCOUNT_CODE, queries::code_variables(code)).await?;
        Ok(discount_from_data(&data)?)
    }

    async fn apply_promotion(&self, promotion_id: &str, subscription_id: &str) -> Result<Vec<String>, SubscriptionApiError> {
        let variables = queries::apply_promotion_variables(promotion_id, subscription_id);
        let data = self.graphql_data(queries::APPLY_PROMOTION, variables).await?;
        Ok(promotion_errors(&data))
    }

    async fn create_subscription(&self, subscription: &NewSubscription) -> Result<Value, SubscriptionApiError> {
        let variables = queries::create_subscription_variables(
            subscription,
            &self.config.return_url,
            &self.config.payment_page_url,
        );
        Ok(self.graphql_request(queries::CREATE_SUBSCRIPTION, variables, None).await?)
    }

    async fn fetch_products(&self) -> Result<Value, SubscriptionApiError> {
        Ok(self.graphql_request(queries::ALL_PRODUCTS, serde_json::json!({}), None).await?)
    }

    async fn create_cart(&self) -> Result<Value, SubscriptionApiError> {
        Ok(self.graphql_request(queries::CREATE_CART, serde_json::json!({}), None).await?)
    }
}
