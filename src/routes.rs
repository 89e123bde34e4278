//! Route table for the HTTP service.
//!
//! Routes are declared in configuration and validated once at startup; the
//! server turns the validated table into an axum router.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// Built-in behaviours a custom route can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerKind {
    /// Fetch a URL and return `{score, recommendations}`
    ScoreWebsite,
    /// Generate title/description/WebSite markup
    GenerateMetadata,
    /// Analyse a stored document's content
    OptimizeDocument,
    /// Attach optimization data to a stored document
    SaveOptimization,
    /// Article JSON-LD for a stored document
    StructuredData,
    /// Full HTML page for a stored document, with agent markup
    RenderDocument,
    /// Semantic or keyword search over optimized documents
    AgentSearch,
    VisibilityAnalytics,
    RobotsTxt,
    Health,
}

impl HandlerKind {
    /// Whether the handler reads a document id from the path
    pub fn needs_id(&self) -> bool {
        matches!(
            self,
            HandlerKind::OptimizeDocument
                | HandlerKind::SaveOptimization
                | HandlerKind::StructuredData
                | HandlerKind::RenderDocument
        )
    }
}

/// One configured endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteConfig {
    /// GET listing of stored documents, with `search` and `page` query parameters
    CollectionQuery {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        post_type: Option<String>,
        #[serde(default = "default_per_page")]
        per_page: usize,
    },

    /// A built-in handler mounted at a path
    Custom {
        path: String,
        method: HttpMethod,
        handler: HandlerKind,
    },
}

fn default_per_page() -> usize {
    10
}

impl RouteConfig {
    pub fn path(&self) -> &str {
        match self {
            RouteConfig::CollectionQuery { path, .. } | RouteConfig::Custom { path, .. } => path,
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            RouteConfig::CollectionQuery { .. } => HttpMethod::Get,
            RouteConfig::Custom { method, .. } => *method,
        }
    }

    fn custom(method: HttpMethod, path: &str, handler: HandlerKind) -> Self {
        RouteConfig::Custom {
            path: path.to_string(),
            method,
            handler,
        }
    }
}

/// The routes served when none are configured
pub fn default_routes() -> Vec<RouteConfig> {
    use HandlerKind::*;
    use HttpMethod::*;

    vec![
        RouteConfig::custom(Get, "/health", Health),
        RouteConfig::custom(Post, "/score-website", ScoreWebsite),
        RouteConfig::custom(Post, "/generate-metadata", GenerateMetadata),
        RouteConfig::custom(Post, "/api/v1/optimize/{id}", OptimizeDocument),
        RouteConfig::custom(Post, "/api/v1/documents/{id}/optimization", SaveOptimization),
        RouteConfig::custom(Get, "/api/v1/structured-data/{id}", StructuredData),
        RouteConfig::custom(Get, "/api/v1/documents/{id}/render", RenderDocument),
        RouteConfig::custom(Get, "/api/v1/search/agent", AgentSearch),
        RouteConfig::custom(Get, "/api/v1/analytics/visibility", VisibilityAnalytics),
        RouteConfig::custom(Get, "/robots.txt", RobotsTxt),
        RouteConfig::CollectionQuery {
            path: "/api/v1/posts".to_string(),
            post_type: Some("post".to_string()),
            per_page: default_per_page(),
        },
    ]
}

/// A validated list of routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteConfig>,
}

impl RouteTable {
    /// Validate configured routes, using [`default_routes`] when the list is empty
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self> {
        let routes = if routes.is_empty() {
            default_routes()
        } else {
            routes.to_vec()
        };

        let mut seen = HashSet::new();
        for route in &routes {
            let path = route.path();
            if !path.starts_with('/') {
                return Err(Error::Routes(format!("path '{}' must start with '/'", path)));
            }
            if !seen.insert((path.to_string(), route.method())) {
                return Err(Error::Routes(format!(
                    "{:?} {} is declared more than once",
                    route.method(),
                    path
                )));
            }
            if let RouteConfig::Custom { handler, .. } = route {
                if handler.needs_id() && !path.contains("{id}") {
                    return Err(Error::Routes(format!(
                        "handler {:?} needs an {{id}} segment in '{}'",
                        handler, path
                    )));
                }
            }
            if let RouteConfig::CollectionQuery { per_page: 0, .. } = route {
                return Err(Error::Routes(format!("per_page must be positive for '{}'", path)));
            }
        }

        Ok(Self { routes })
    }

    pub fn routes(&self) -> &[RouteConfig] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let table = RouteTable::from_config(&[]).unwrap();
        assert_eq!(table.len(), default_routes().len());
    }

    #[test]
    fn test_parse_tagged_routes() {
        let json = r#"[
            {"type": "collection_query", "path": "/products", "post_type": "product"},
            {"type": "custom", "path": "/score", "method": "POST", "handler": "score_website"}
        ]"#;
        let routes: Vec<RouteConfig> = serde_json::from_str(json).unwrap();
        assert_eq!(
            routes[0],
            RouteConfig::CollectionQuery {
                path: "/products".into(),
                post_type: Some("product".into()),
                per_page: 10,
            }
        );
        assert_eq!(routes[1].method(), HttpMethod::Post);

        let table = RouteTable::from_config(&routes).unwrap();
        assert_eq!(table.routes().len(), 2);
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let routes = vec![
            RouteConfig::custom(HttpMethod::Get, "/health", HandlerKind::Health),
            RouteConfig::custom(HttpMethod::Get, "/health", HandlerKind::Health),
        ];
        assert!(matches!(
            RouteTable::from_config(&routes),
            Err(Error::Routes(_))
        ));

        // Same path, different method is fine
        let routes = vec![
            RouteConfig::custom(HttpMethod::Get, "/x/{id}", HandlerKind::StructuredData),
            RouteConfig::custom(HttpMethod::Post, "/x/{id}", HandlerKind::OptimizeDocument),
        ];
        assert!(RouteTable::from_config(&routes).is_ok());
    }

    #[test]
    fn test_id_handler_needs_id_segment() {
        let routes = vec![RouteConfig::custom(
            HttpMethod::Post,
            "/optimize",
            HandlerKind::OptimizeDocument,
        )];
        assert!(RouteTable::from_config(&routes).is_err());
    }

    #[test]
    fn test_invalid_paths_rejected() {
        let routes = vec![RouteConfig::custom(HttpMethod::Get, "health", HandlerKind::Health)];
        assert!(RouteTable::from_config(&routes).is_err());

        let routes = vec![RouteConfig::CollectionQuery {
            path: "/posts".into(),
            post_type: None,
            per_page: 0,
        }];
        assert!(RouteTable::from_config(&routes).is_err());
    }
}
