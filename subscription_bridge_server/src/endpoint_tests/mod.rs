mod helpers;
mod mocks;
mod signature;
mod subscriptions;
