//! Field names shared by the EN1545 record layouts.
//!
//! Layouts and the code reading their results agree on keys through these
//! constants. Date and time leaves take a base name (such as [EVENT] or
//! [CONTRACT_START]) and add their kind suffix, see [crate::field::IntKind].

// Environment and holder records.
pub const ENV_NETWORK_ID: &str = "EnvNetworkId";
pub const ENV_VERSION_NUMBER: &str = "EnvVersionNumber";
pub const ENV_APPLICATION_VALIDITY_END: &str = "EnvApplicationValidityEnd";
pub const ENV_APPLICATION_ISSUER_ID: &str = "EnvApplicationIssuerId";
pub const ENV_APPLICATION_ISSUE: &str = "EnvApplicationIssue";
pub const ENV_AUTHENTICATOR: &str = "EnvAuthenticator";
pub const ENV_CARD_SERIAL: &str = "EnvCardSerial";
pub const ENV_UNKNOWN_A: &str = "EnvUnknownA";
pub const ENV_UNKNOWN_B: &str = "EnvUnknownB";
pub const ENV_UNKNOWN_C: &str = "EnvUnknownC";
pub const ENV_UNKNOWN_D: &str = "EnvUnknownD";
pub const ENV_UNKNOWN_E: &str = "EnvUnknownE";
/// Base of the holder birth date, usually a BCD date.
pub const HOLDER_BIRTH: &str = "HolderBirth";
pub const HOLDER_ID_NUMBER: &str = "HolderIdNumber";
pub const HOLDER_POSTAL_CODE: &str = "HolderPostalCode";
pub const HOLDER_PROFILE: &str = "HolderProfile";
pub const HOLDER_UNKNOWN_A: &str = "HolderUnknownA";
pub const HOLDER_UNKNOWN_B: &str = "HolderUnknownB";
pub const HOLDER_UNKNOWN_C: &str = "HolderUnknownC";
pub const HOLDER_UNKNOWN_D: &str = "HolderUnknownD";

// Contract list entries.
pub const CONTRACTS_PROVIDER: &str = "ContractsProvider";
pub const CONTRACTS_POINTER: &str = "ContractsPointer";
pub const CONTRACTS_TARIFF: &str = "ContractsTariff";
pub const CONTRACTS_NETWORK_ID: &str = "ContractsNetworkId";
pub const CONTRACTS_UNKNOWN_A: &str = "ContractsUnknownA";
pub const CONTRACTS_UNKNOWN_B: &str = "ContractsUnknownB";

// Contracts.
pub const CONTRACT_AUTHENTICATOR: &str = "ContractAuthenticator";
pub const CONTRACT_DEBIT_SOLD: &str = "ContractDebitSold";
pub const CONTRACT_DESTINATION_1: &str = "ContractDestination1";
pub const CONTRACT_DESTINATION_2: &str = "ContractDestination2";
pub const CONTRACT_DURATION: &str = "ContractDuration";
pub const CONTRACT_END: &str = "ContractEnd";
pub const CONTRACT_INTERCHANGE: &str = "ContractInterchange";
pub const CONTRACT_JOURNEYS: &str = "ContractJourneys";
pub const CONTRACT_LAST_USE: &str = "ContractLastUse";
pub const CONTRACT_NETWORK_ID: &str = "ContractNetworkId";
pub const CONTRACT_ORIGIN_1: &str = "ContractOrigin1";
pub const CONTRACT_ORIGIN_2: &str = "ContractOrigin2";
pub const CONTRACT_PASSENGER_CLASS: &str = "ContractPassengerClass";
pub const CONTRACT_PASSENGER_TOTAL: &str = "ContractPassengerTotal";
pub const CONTRACT_PAY_METHOD: &str = "ContractPayMethod";
pub const CONTRACT_PRICE_AMOUNT: &str = "ContractPriceAmount";
pub const CONTRACT_PROVIDER: &str = "ContractProvider";
pub const CONTRACT_RECEIPT_DELIVERED: &str = "ContractReceiptDelivered";
pub const CONTRACT_RESTRICT_CODE: &str = "ContractRestrictCode";
pub const CONTRACT_SALE: &str = "ContractSale";
pub const CONTRACT_SALE_AGENT: &str = "ContractSaleAgent";
pub const CONTRACT_SALE_DEVICE: &str = "ContractSaleDevice";
pub const CONTRACT_SERIAL_NUMBER: &str = "ContractSerialNumber";
pub const CONTRACT_SOLD: &str = "ContractSold";
pub const CONTRACT_START: &str = "ContractStart";
pub const CONTRACT_STATUS: &str = "ContractStatus";
pub const CONTRACT_TARIFF: &str = "ContractTariff";
pub const CONTRACT_VEHICULE_CLASS_ALLOWED: &str = "ContractVehiculeClassAllowed";
pub const CONTRACT_VIA_1: &str = "ContractVia1";
pub const CONTRACT_ZONES: &str = "ContractZones";
pub const CONTRACT_UNKNOWN_A: &str = "ContractUnknownA";
pub const CONTRACT_UNKNOWN_B: &str = "ContractUnknownB";
pub const CONTRACT_UNKNOWN_C: &str = "ContractUnknownC";
pub const CONTRACT_UNKNOWN_D: &str = "ContractUnknownD";
pub const CONTRACT_UNKNOWN_E: &str = "ContractUnknownE";
pub const CONTRACT_UNKNOWN_F: &str = "ContractUnknownF";
pub const LINKED_CONTRACT: &str = "LinkedContract";

// Events.
/// Base of the event timestamp.
pub const EVENT: &str = "Event";
pub const EVENT_AUTHENTICATOR: &str = "EventAuthenticator";
pub const EVENT_BITMAP_EXTRA: &str = "EventBitmapExtra";
pub const EVENT_CODE: &str = "EventCode";
pub const EVENT_CONTRACT_POINTER: &str = "EventContractPointer";
pub const EVENT_DATA_SIMULATION: &str = "EventDataSimulation";
pub const EVENT_DESTINATION: &str = "EventDestination";
pub const EVENT_DEVICE: &str = "EventDevice";
pub const EVENT_DEVICE_ID: &str = "EventDeviceId";
pub const EVENT_DISPLAY_DATA: &str = "EventDisplayData";
pub const EVENT_FIRST_LOCATION_ID: &str = "EventFirstLocationId";
/// Base of the first validation of a journey.
pub const EVENT_FIRST_STAMP: &str = "EventFirstStamp";
pub const EVENT_JOURNEY_DISTANCE: &str = "EventJourneyDistance";
pub const EVENT_JOURNEY_INTERCHANGES: &str = "EventJourneyInterchanges";
pub const EVENT_JOURNEY_RUN: &str = "EventJourneyRun";
pub const EVENT_LOCATION_GATE: &str = "EventLocationGate";
pub const EVENT_LOCATION_ID: &str = "EventLocationId";
pub const EVENT_LOCATION_TYPE: &str = "EventLocationType";
pub const EVENT_NETWORK_ID: &str = "EventNetworkId";
pub const EVENT_NOT_OK_COUNTER: &str = "EventNotOkCounter";
pub const EVENT_PASSENGER_COUNT: &str = "EventPassengerCount";
pub const EVENT_PERIOD_JOURNEYS: &str = "EventPeriodJourneys";
pub const EVENT_PRICE_AMOUNT: &str = "EventPriceAmount";
pub const EVENT_PRICE_UNIT: &str = "EventPriceUnit";
pub const EVENT_RESULT: &str = "EventResult";
pub const EVENT_ROUTE_NUMBER: &str = "EventRouteNumber";
pub const EVENT_ROUTE_VARIANT: &str = "EventRouteVariant";
pub const EVENT_SERIAL_NUMBER: &str = "EventSerialNumber";
pub const EVENT_SERVICE_PROVIDER: &str = "EventServiceProvider";
pub const EVENT_TOTAL_JOURNEYS: &str = "EventTotalJourneys";
pub const EVENT_VEHICLE_ID: &str = "EventVehicleId";
pub const EVENT_UNKNOWN_A: &str = "EventUnknownA";
pub const EVENT_UNKNOWN_B: &str = "EventUnknownB";
pub const EVENT_UNKNOWN_C: &str = "EventUnknownC";
pub const EVENT_UNKNOWN_D: &str = "EventUnknownD";
pub const EVENT_UNKNOWN_E: &str = "EventUnknownE";
pub const EVENT_UNKNOWN_F: &str = "EventUnknownF";
pub const EVENT_UNKNOWN_G: &str = "EventUnknownG";
pub const EVENT_UNKNOWN_H: &str = "EventUnknownH";
pub const EVENT_UNKNOWN_I: &str = "EventUnknownI";
