use crate::core::{
    errors::{AppError, AppResult},
    types::Provider,
};

const SERVICE_NAME: &str = "claimscope";

fn username_for_provider(provider: Provider) -> &'static str {
    match provider {
        Provider::Perplexity => "perplexity",
    }
}

fn entry_for(provider: Provider) -> AppResult<keyring::Entry> {
    keyring::Entry::new(SERVICE_NAME, username_for_provider(provider))
        .map_err(|err| AppError::Keyring(err.to_string()))
}

pub fn set_provider_key(provider: Provider, api_key: &str) -> AppResult<()> {
    entry_for(provider)?
        .set_password(api_key)
        .map_err(|err| AppError::Keyring(err.to_string()))
}

pub fn get_provider_key(provider: Provider) -> AppResult<String> {
    entry_for(provider)?
        .get_password()
        .map_err(|_err| AppError::ProviderAuth)
}
