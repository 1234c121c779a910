use std::sync::LazyLock;

use regex::Regex;

use crate::{
    core::{client::ApiClient, form::FormBody},
    models::{
        RewriteAction, RewriteCreateResponse, RewriteListResponse, RewriteMatch,
        RewriteMessageResponse, RewriteRuleRequest, SimplifiedRuleRequest,
    },
    ports::upstream::UpstreamResult,
};

/// `[text](url)` as pasted from rendered Markdown.
static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("valid regex"));

/// TLS mode applied to every newly created rule.
const NEW_RULE_SSL_MODE: &str = "partial";

/// Rewrite ("smart") rules: match conditions on a zone mapped to actions.
#[derive(Debug, Clone)]
pub struct RewriteService {
    client: ApiClient,
}

impl RewriteService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create_rule(
        &self,
        domain: &str,
        request: &RewriteRuleRequest,
    ) -> UpstreamResult<RewriteCreateResponse> {
        let mut form = rule_form(request);
        form.insert("action[ssl_mode]".to_string(), NEW_RULE_SSL_MODE.to_string());

        tracing::info!(
            "Creating rewrite rule on {}: {} -> {}",
            domain,
            form.get("match[request_uri]").map(String::as_str).unwrap_or("*"),
            form.get("action[backend]").map(String::as_str).unwrap_or("-")
        );
        tracing::debug!("Rewrite rule form: {:?}", form);

        let created: RewriteCreateResponse = self
            .client
            .post(&format!("/rules/settings/{domain}"), &form)
            .await?
            .into_success()?;

        tracing::info!("Rewrite rule {} created on {}", created.response.id, domain);
        Ok(created)
    }

    pub async fn list_rules(&self, domain: &str) -> UpstreamResult<RewriteListResponse> {
        let rules: RewriteListResponse = self
            .client
            .get(&format!("/rules/settings/{domain}"))
            .await?
            .into_success()?;

        tracing::debug!("{} rewrite rule(s) on {}", rules.response.rules.len(), domain);
        Ok(rules)
    }

    pub async fn update_rule(
        &self,
        domain: &str,
        id: &str,
        request: &RewriteRuleRequest,
    ) -> UpstreamResult<RewriteMessageResponse> {
        tracing::info!("Updating rewrite rule {} on {}", id, domain);
        self.client
            .put(&format!("/rules/settings/{domain}/{id}"), &rule_form(request))
            .await?
            .into_success()
    }

    pub async fn delete_rule(&self, domain: &str, id: &str) -> UpstreamResult<RewriteMessageResponse> {
        tracing::info!("Deleting rewrite rule {} on {}", id, domain);
        self.client
            .delete_no_body(&format!("/rules/settings/{domain}/{id}"))
            .await?
            .into_success()
    }

    /// Create the bucket-serving rule described by `request` on its parent zone.
    pub async fn create_simplified(
        &self,
        request: &SimplifiedRuleRequest,
    ) -> UpstreamResult<RewriteCreateResponse> {
        tracing::info!(
            "Serving {} from {} (account {}) via zone {}",
            request.domain,
            request.bucket_url,
            request.account_id,
            request.parent_domain
        );
        self.create_rule(&request.parent_domain, &simplified_rule(request))
            .await
    }
}

/// Expand a simplified request into a full rule: every path on the subdomain
/// is served from `<bucket>/<account>/`.
pub fn simplified_rule(request: &SimplifiedRuleRequest) -> RewriteRuleRequest {
    let cors = if request.domain.starts_with("http://") || request.domain.starts_with("https://") {
        request.domain.clone()
    } else {
        format!("http://{}", request.domain)
    };

    RewriteRuleRequest {
        matcher: RewriteMatch {
            request_uri: "/*".to_string(),
            host: request.domain.clone(),
            ..Default::default()
        },
        action: RewriteAction {
            cross_origin: cors,
            rewrite_uri: format!("/{}/$1", request.account_id),
            rewrite_host: request.bucket_url.clone(),
            destination: request.bucket_url.clone(),
            ..Default::default()
        },
    }
}

/// Build the upstream form for a rule. Blank fields are left out.
pub fn rule_form(request: &RewriteRuleRequest) -> FormBody {
    let RewriteRuleRequest { matcher, action } = request;
    let mut form = FormBody::new();

    let request_uri = if matcher.request_uri.is_empty() {
        &matcher.request
    } else {
        &matcher.request_uri
    };
    put(&mut form, "match[request_uri]", request_uri);
    put(&mut form, "match[host]", &matcher.host);

    for (i, method) in matcher.request_methods.iter().enumerate() {
        put(&mut form, &format!("match[request_method][{i}]"), method);
    }
    for (i, device) in matcher.device_types.iter().enumerate() {
        put(&mut form, &format!("match[device_type][{i}]"), device);
    }

    put(&mut form, "action[redirect_type]", &action.redirect_type);
    put(&mut form, "action[redirect_to]", &action.redirect_to);
    put(&mut form, "action[set_uri]", &action.rewrite_uri);
    put(&mut form, "action[set_host]", &action.rewrite_host);
    put(&mut form, "action[backend]", &action.destination);

    if !action.cross_origin.is_empty() {
        let cors = link_target(&action.cross_origin);
        if cors != action.cross_origin {
            tracing::debug!("CORS value {:?} cleaned to {:?}", action.cross_origin, cors);
        }
        put(&mut form, "action[cors]", &cors);
    }

    form
}

fn put(form: &mut FormBody, key: &str, value: &str) {
    if !value.is_empty() {
        form.insert(key.to_string(), value.to_string());
    }
}

/// Pull the URL out of a Markdown link, or return the input untouched.
pub fn link_target(input: &str) -> String {
    if !input.contains('[') && !input.contains(']') {
        return input.to_string();
    }

    if let Some(url) = MARKDOWN_LINK.captures(input).and_then(|c| c.get(2)) {
        return url.as_str().to_string();
    }

    if let Some((_, rest)) = input.split_once("](") {
        return rest.strip_suffix(')').unwrap_or(rest).to_string();
    }

    input.to_string()
}
