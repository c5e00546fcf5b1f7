// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains. Reading
//! them top to bottom tells you where the reader talks to, how much it asks
//! for per request, and where it stops.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Platform endpoints
// ---------------------------------------------------------------------------

/// Open-API root for Feishu tenants. Lark tenants override this.
pub const FEISHU_API_BASE_URL: &str = "https://open.feishu.cn/open-apis";

/// Endpoint that trades app credentials for a tenant access token.
pub const TENANT_TOKEN_ENDPOINT: &str = "auth/v3/tenant_access_token/internal";

/// Timeout for the credential exchange.
pub const AUTH_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for every other API call.
pub const API_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Page sizes
// ---------------------------------------------------------------------------

/// Blocks per page when listing a document's blocks (platform maximum).
pub const DOCX_BLOCKS_PAGE_SIZE: u32 = 500;

/// Records per page when listing a bitable table.
pub const BITABLE_RECORDS_PAGE_SIZE: u32 = 500;

/// Tables or fields per page when listing bitable structure.
pub const BITABLE_STRUCTURE_PAGE_SIZE: u32 = 100;

/// Nodes per page when listing a wiki space or a node's children.
pub const WIKI_NODES_PAGE_SIZE: u32 = 50;

// ---------------------------------------------------------------------------
// Traversal and volume limits
// ---------------------------------------------------------------------------

/// Deepest wiki level whose nodes get content and children resolved.
///
/// Depth 0 is the node list handed to the traversal. Nodes listed below
/// this level are returned as the platform described them, unexpanded.
pub const DEFAULT_WIKI_MAX_DEPTH: u8 = 5;

/// Upper bound accepted for a configured wiki depth.
pub const WIKI_MAX_DEPTH_CEILING: u8 = 32;

/// Records collected per bitable table before the drain stops and the
/// table is marked truncated.
pub const DEFAULT_BITABLE_RECORD_CAP: usize = 10_000;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
