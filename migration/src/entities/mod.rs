pub mod campaign;
pub mod campaign_collateral;
pub mod collateral;
pub mod collateral_transaction;
pub mod doctor;
pub mod field_rep;

pub use campaign::Entity as CampaignEntity;
pub use campaign_collateral::Entity as CampaignCollateralEntity;
pub use collateral::Entity as CollateralEntity;
pub use collateral_transaction::Entity as CollateralTransactionEntity;
pub use doctor::Entity as DoctorEntity;
pub use field_rep::Entity as FieldRepEntity;
