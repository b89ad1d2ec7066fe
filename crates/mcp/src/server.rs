//! MCP server implementation for Tably.
//!
//! Exposes the reservation provider's five operations as MCP tools so AI
//! agents can search restaurants, check availability, and manage bookings.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::schema_for_type,
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
    },
    schemars::{self, JsonSchema},
    service::{RequestContext, RoleServer},
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use tably_core::{BookingRequest, DomainError, ReservationProvider, SearchCriteria};

/// Main MCP server for Tably.
///
/// Holds the reservation provider behind its trait object so the serving
/// layer stays backend-agnostic.
#[derive(Clone)]
pub struct ReservationServer {
    provider: Arc<dyn ReservationProvider>,
}

impl ReservationServer {
    pub fn new(provider: Arc<dyn ReservationProvider>) -> Self {
        Self { provider }
    }
}

// ============================================================================
// Tool Parameter Types
// ============================================================================

/// Parameters for the search_restaurants tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchRestaurantsParams {
    /// City name to search in (e.g. "Boston", "New York")
    pub city: String,
    /// Optional cuisine type filter (e.g. "Italian", "Japanese", "Mexican")
    #[serde(default)]
    pub cuisine: Option<String>,
    /// Optional ISO 8601 datetime for availability-aware search
    #[serde(default)]
    pub date_time: Option<String>,
    /// Optional number of guests for filtering
    #[serde(default)]
    pub party_size: Option<i64>,
    /// Optional price tier 1-4 (1=$, 2=$$, 3=$$$, 4=$$$$)
    #[serde(default)]
    pub price_tier: Option<i64>,
    /// Optional maximum distance from the city center in kilometers
    #[serde(default)]
    pub distance_km: Option<f64>,
}

/// Parameters for the check_availability tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CheckAvailabilityParams {
    /// Unique restaurant identifier (e.g. "rest_001")
    pub restaurant_id: String,
    /// ISO 8601 datetime for the date to check (e.g. "2025-03-15T18:00:00")
    pub date_time: String,
    /// Number of guests in the party
    pub party_size: i64,
}

/// Parameters for the place_reservation tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PlaceReservationParams {
    /// Unique restaurant identifier (e.g. "rest_001")
    pub restaurant_id: String,
    /// ISO 8601 datetime for the reservation (e.g. "2025-03-15T19:00:00")
    pub date_time: String,
    /// Number of guests
    pub party_size: i64,
    /// Guest's full name
    pub name: String,
    /// Guest's contact phone number (e.g. "+1-555-123-4567")
    pub phone: String,
    /// Guest's email address
    pub email: String,
    /// Optional special requests or dietary restrictions
    #[serde(default)]
    pub notes: Option<String>,
}

/// Parameters for the cancel_reservation tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CancelReservationParams {
    /// Unique reservation identifier (e.g. "reservation_abc123")
    pub reservation_id: String,
    /// Optional reason for cancellation
    #[serde(default)]
    pub reason: Option<String>,
}

/// Parameters for the list_reservations tool
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListReservationsParams {
    /// User identifier, either an email address or a phone number
    pub user_id: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

impl ReservationServer {
    pub async fn handle_search_restaurants(
        &self,
        params: SearchRestaurantsParams,
    ) -> Result<String, String> {
        let correlation_id = correlation_id();
        info!(
            event_name = "mcp.restaurants.search",
            correlation_id = %correlation_id,
            city = %params.city,
            cuisine = params.cuisine.as_deref().unwrap_or("any"),
            "searching restaurants"
        );

        let criteria = SearchCriteria {
            city: params.city,
            cuisine: params.cuisine,
            date_time: params.date_time,
            party_size: params.party_size,
            price_tier: params.price_tier,
            distance_km: params.distance_km,
        };

        match self.provider.search_restaurants(&criteria).await {
            Ok(restaurants) => {
                debug!(
                    correlation_id = %correlation_id,
                    count = restaurants.len(),
                    "restaurant search finished"
                );
                to_pretty_json(&restaurants)
            }
            Err(error) => Err(report_failure("search_restaurants", &correlation_id, &error)),
        }
    }

    pub async fn handle_check_availability(
        &self,
        params: CheckAvailabilityParams,
    ) -> Result<String, String> {
        let correlation_id = correlation_id();
        info!(
            event_name = "mcp.availability.check",
            correlation_id = %correlation_id,
            restaurant_id = %params.restaurant_id,
            date_time = %params.date_time,
            party_size = params.party_size,
            "checking availability"
        );

        let slots = self
            .provider
            .check_availability(&params.restaurant_id, &params.date_time, params.party_size)
            .await;

        match slots {
            Ok(slots) => {
                debug!(
                    correlation_id = %correlation_id,
                    count = slots.len(),
                    "availability check finished"
                );
                to_pretty_json(&slots)
            }
            Err(error) => Err(report_failure("check_availability", &correlation_id, &error)),
        }
    }

    pub async fn handle_place_reservation(
        &self,
        params: PlaceReservationParams,
    ) -> Result<String, String> {
        let correlation_id = correlation_id();
        info!(
            event_name = "mcp.reservation.requested",
            correlation_id = %correlation_id,
            restaurant_id = %params.restaurant_id,
            guest_name = %params.name,
            party_size = params.party_size,
            "placing reservation"
        );

        let request = BookingRequest {
            date_time: params.date_time,
            party_size: params.party_size,
            guest_name: params.name,
            guest_phone: params.phone,
            guest_email: params.email,
            notes: params.notes,
        };

        match self.provider.place_reservation(&params.restaurant_id, request).await {
            Ok(reservation) => {
                info!(
                    event_name = "mcp.reservation.placed",
                    correlation_id = %correlation_id,
                    confirmation_code = %reservation.confirmation_code,
                    "reservation placed"
                );
                to_pretty_json(&reservation)
            }
            Err(error) => Err(report_failure("place_reservation", &correlation_id, &error)),
        }
    }

    pub async fn handle_cancel_reservation(
        &self,
        params: CancelReservationParams,
    ) -> Result<String, String> {
        let correlation_id = correlation_id();
        info!(
            event_name = "mcp.reservation.cancel_requested",
            correlation_id = %correlation_id,
            reservation_id = %params.reservation_id,
            "cancelling reservation"
        );

        match self.provider.cancel_reservation(&params.reservation_id, params.reason).await {
            Ok(receipt) => {
                info!(
                    event_name = "mcp.reservation.cancelled",
                    correlation_id = %correlation_id,
                    reservation_id = %params.reservation_id,
                    "reservation cancelled"
                );
                to_pretty_json(&receipt)
            }
            Err(error) => Err(report_failure("cancel_reservation", &correlation_id, &error)),
        }
    }

    pub async fn handle_list_reservations(
        &self,
        params: ListReservationsParams,
    ) -> Result<String, String> {
        let correlation_id = correlation_id();
        info!(
            event_name = "mcp.reservations.list",
            correlation_id = %correlation_id,
            user_id = %params.user_id,
            "listing reservations"
        );

        match self.provider.list_reservations(&params.user_id).await {
            Ok(reservations) => {
                debug!(
                    correlation_id = %correlation_id,
                    count = reservations.len(),
                    "reservation listing finished"
                );
                to_pretty_json(&reservations)
            }
            Err(error) => Err(report_failure("list_reservations", &correlation_id, &error)),
        }
    }
}

fn correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| error_payload(format!("failed to serialize response: {e}")))
}

/// Failures travel as a `{"error": message}` object so callers can tell an
/// error apart from an empty result by shape alone.
fn error_payload(message: impl AsRef<str>) -> String {
    serde_json::json!({ "error": message.as_ref() }).to_string()
}

fn report_failure(tool: &str, correlation_id: &str, error: &DomainError) -> String {
    warn!(
        event_name = "mcp.tool.failed",
        correlation_id = %correlation_id,
        tool = tool,
        error = %error,
        "tool call failed"
    );
    error_payload(error.to_string())
}

fn parse_params<T: DeserializeOwned>(
    arguments: Option<serde_json::Map<String, Value>>,
) -> Result<T, McpError> {
    serde_json::from_value(Value::Object(arguments.unwrap_or_default()))
        .map_err(|e| McpError::invalid_params(format!("Invalid parameters: {}", e), None))
}

// ============================================================================
// Server Handler Implementation
// ============================================================================

impl ServerHandler for ReservationServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "Restaurant Reservations".to_string(),
                title: Some("Tably Reservation Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Restaurant reservation tools backed by a provider abstraction. \
                Use search_restaurants to find restaurants by city and filters, \
                check_availability for a restaurant's open time slots on a date, \
                place_reservation to book a table (idempotent on duplicate submissions), \
                cancel_reservation to cancel by reservation ID, \
                and list_reservations to review a guest's bookings by email or phone."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool::new(
                "search_restaurants",
                "Search for restaurants matching the given criteria. City is required; cuisine, party size, and price tier (1-4) narrow the results. Returns matching restaurants as JSON.",
                schema_for_type::<SearchRestaurantsParams>(),
            ),
            Tool::new(
                "check_availability",
                "Check availability for a specific restaurant on a given date. Returns the day's lunch and dinner time slots with per-slot capacity and availability.",
                schema_for_type::<CheckAvailabilityParams>(),
            ),
            Tool::new(
                "place_reservation",
                "Place a reservation at a restaurant. Idempotent: submitting the same reservation details multiple times returns the same confirmation without creating duplicates.",
                schema_for_type::<PlaceReservationParams>(),
            ),
            Tool::new(
                "cancel_reservation",
                "Cancel an existing reservation by its ID. Returns a cancellation receipt; cancelling an unknown or already-cancelled reservation reports an error.",
                schema_for_type::<CancelReservationParams>(),
            ),
            Tool::new(
                "list_reservations",
                "List all reservations for a user. The user ID may be the guest's email address or phone number.",
                schema_for_type::<ListReservationsParams>(),
            ),
        ];

        Ok(ListToolsResult { meta: None, tools, next_cursor: None })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let result = match request.name.as_ref() {
            "search_restaurants" => {
                self.handle_search_restaurants(parse_params(request.arguments)?).await
            }
            "check_availability" => {
                self.handle_check_availability(parse_params(request.arguments)?).await
            }
            "place_reservation" => {
                self.handle_place_reservation(parse_params(request.arguments)?).await
            }
            "cancel_reservation" => {
                self.handle_cancel_reservation(parse_params(request.arguments)?).await
            }
            "list_reservations" => {
                self.handle_list_reservations(parse_params(request.arguments)?).await
            }
            other => Err(error_payload(format!("unknown tool: {other}"))),
        };

        match result {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(error) => Ok(CallToolResult::error(vec![Content::text(error)])),
        }
    }
}
