//! Initial schema migration - creates all tables from scratch.
//!
//! Complete schema for Sahyaatra:
//!
//! - `users`: authentication
//! - `profiles`: display name, bio, interest tags
//! - `trips`: journeys posted by an author with traveler capacity
//! - `trip_requests`: join requests (one per trip and requester)
//! - `messages`: per-trip chat, text and system entries
//! - `budgets`: per-user, per-trip category allocations
//! - `expenses`: spending recorded against a budget
//! - `states`: the seeded destination map
//! - `places`: the tourist-place catalog

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
    Name,
    Email,
}

#[derive(Iden)]
enum Profiles {
    Table,
    UserId,
    Name,
    Bio,
    Interests,
    Verified,
    Avatar,
}

#[derive(Iden)]
enum Trips {
    Table,
    Id,
    AuthorId,
    Destination,
    StartDate,
    EndDate,
    Budget,
    MaxTravelers,
    CurrentTravelers,
    Interests,
    Description,
    Status,
    ImageUrl,
    CreatedAt,
}

#[derive(Iden)]
enum TripRequests {
    Table,
    Id,
    TripId,
    RequesterId,
    Message,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Messages {
    Table,
    Id,
    TripId,
    SenderId,
    Content,
    Kind,
    CreatedAt,
}

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    TripId,
    UserId,
    Travel,
    Food,
    Stay,
    Activities,
    Misc,
    TotalBudget,
    CreatedAt,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    BudgetId,
    UserId,
    Category,
    Amount,
    Description,
    Date,
    CreatedAt,
}

#[derive(Iden)]
enum States {
    Table,
    Id,
    Code,
    Name,
    Description,
    Attractions,
    BestTime,
    ImageUrl,
}

#[derive(Iden)]
enum Places {
    Table,
    Id,
    State,
    StateCode,
    PlaceName,
    Category,
    Description,
    Timings,
    EntryFee,
    BestTime,
    NearestRailway,
    NearestBus,
    NearestAirport,
    MetroStation,
    Accessibility,
    GuidedTours,
    Parking,
    NearbyAmenities,
    OfficialWebsite,
    Wikipedia,
    SpecialNotes,
    ImageUrl,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::Name).string())
                    .col(ColumnDef::new(Users::Email).string())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Profiles
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profiles::Name).string().not_null())
                    .col(ColumnDef::new(Profiles::Bio).string())
                    .col(ColumnDef::new(Profiles::Interests).string().not_null())
                    .col(ColumnDef::new(Profiles::Verified).boolean().not_null())
                    .col(ColumnDef::new(Profiles::Avatar).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-profiles-user_id")
                            .from(Profiles::Table, Profiles::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Trips
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Trips::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Trips::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Trips::AuthorId).string().not_null())
                    .col(ColumnDef::new(Trips::Destination).string().not_null())
                    .col(ColumnDef::new(Trips::StartDate).string().not_null())
                    .col(ColumnDef::new(Trips::EndDate).string().not_null())
                    .col(ColumnDef::new(Trips::Budget).big_integer().not_null())
                    .col(ColumnDef::new(Trips::MaxTravelers).integer().not_null())
                    .col(
                        ColumnDef::new(Trips::CurrentTravelers)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Trips::Interests).string().not_null())
                    .col(ColumnDef::new(Trips::Description).string().not_null())
                    .col(
                        ColumnDef::new(Trips::Status)
                            .string()
                            .not_null()
                            .default("open"),
                    )
                    .col(ColumnDef::new(Trips::ImageUrl).string())
                    .col(ColumnDef::new(Trips::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trips-author_id")
                            .from(Trips::Table, Trips::AuthorId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-trips-author_id")
                    .table(Trips::Table)
                    .col(Trips::AuthorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-trips-status")
                    .table(Trips::Table)
                    .col(Trips::Status)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Trip requests
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(TripRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TripRequests::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TripRequests::TripId).string().not_null())
                    .col(
                        ColumnDef::new(TripRequests::RequesterId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TripRequests::Message).string().not_null())
                    .col(
                        ColumnDef::new(TripRequests::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(TripRequests::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trip_requests-trip_id")
                            .from(TripRequests::Table, TripRequests::TripId)
                            .to(Trips::Table, Trips::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-trip_requests-requester_id")
                            .from(TripRequests::Table, TripRequests::RequesterId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        // One request per (trip, requester), whatever its status.
        manager
            .create_index(
                Index::create()
                    .name("idx-trip_requests-trip_id-requester_id-unique")
                    .table(TripRequests::Table)
                    .col(TripRequests::TripId)
                    .col(TripRequests::RequesterId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-trip_requests-requester_id")
                    .table(TripRequests::Table)
                    .col(TripRequests::RequesterId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Messages
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messages::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messages::TripId).string().not_null())
                    .col(ColumnDef::new(Messages::SenderId).string().not_null())
                    .col(ColumnDef::new(Messages::Content).string().not_null())
                    .col(ColumnDef::new(Messages::Kind).string().not_null())
                    .col(ColumnDef::new(Messages::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-messages-trip_id")
                            .from(Messages::Table, Messages::TripId)
                            .to(Trips::Table, Trips::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-messages-trip_id")
                    .table(Messages::Table)
                    .col(Messages::TripId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Budgets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Budgets::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Budgets::TripId).string().not_null())
                    .col(ColumnDef::new(Budgets::UserId).string().not_null())
                    .col(ColumnDef::new(Budgets::Travel).big_integer().not_null())
                    .col(ColumnDef::new(Budgets::Food).big_integer().not_null())
                    .col(ColumnDef::new(Budgets::Stay).big_integer().not_null())
                    .col(
                        ColumnDef::new(Budgets::Activities)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Budgets::Misc).big_integer().not_null())
                    .col(
                        ColumnDef::new(Budgets::TotalBudget)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Budgets::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budgets-trip_id")
                            .from(Budgets::Table, Budgets::TripId)
                            .to(Trips::Table, Trips::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-budgets-user_id")
                            .from(Budgets::Table, Budgets::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        // One budget per (trip, user).
        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-trip_id-user_id-unique")
                    .table(Budgets::Table)
                    .col(Budgets::TripId)
                    .col(Budgets::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-budgets-user_id")
                    .table(Budgets::Table)
                    .col(Budgets::UserId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Expenses
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::BudgetId).string().not_null())
                    .col(ColumnDef::new(Expenses::UserId).string().not_null())
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(ColumnDef::new(Expenses::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(ColumnDef::new(Expenses::Date).string().not_null())
                    .col(ColumnDef::new(Expenses::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expenses-budget_id")
                            .from(Expenses::Table, Expenses::BudgetId)
                            .to(Budgets::Table, Budgets::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-budget_id")
                    .table(Expenses::Table)
                    .col(Expenses::BudgetId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 8. States
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(States::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(States::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(States::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(States::Name).string().not_null())
                    .col(ColumnDef::new(States::Description).string().not_null())
                    .col(ColumnDef::new(States::Attractions).string().not_null())
                    .col(ColumnDef::new(States::BestTime).string().not_null())
                    .col(ColumnDef::new(States::ImageUrl).string())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 9. Places
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Places::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Places::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Places::State).string().not_null())
                    .col(ColumnDef::new(Places::StateCode).string().not_null())
                    .col(ColumnDef::new(Places::PlaceName).string().not_null())
                    .col(ColumnDef::new(Places::Category).string().not_null())
                    .col(ColumnDef::new(Places::Description).string())
                    .col(ColumnDef::new(Places::Timings).string())
                    .col(ColumnDef::new(Places::EntryFee).string())
                    .col(ColumnDef::new(Places::BestTime).string())
                    .col(ColumnDef::new(Places::NearestRailway).string())
                    .col(ColumnDef::new(Places::NearestBus).string())
                    .col(ColumnDef::new(Places::NearestAirport).string())
                    .col(ColumnDef::new(Places::MetroStation).string())
                    .col(ColumnDef::new(Places::Accessibility).string())
                    .col(ColumnDef::new(Places::GuidedTours).string())
                    .col(ColumnDef::new(Places::Parking).string())
                    .col(ColumnDef::new(Places::NearbyAmenities).string())
                    .col(ColumnDef::new(Places::OfficialWebsite).string())
                    .col(ColumnDef::new(Places::Wikipedia).string())
                    .col(ColumnDef::new(Places::SpecialNotes).string())
                    .col(ColumnDef::new(Places::ImageUrl).string())
                    .col(ColumnDef::new(Places::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-places-state_code")
                    .table(Places::Table)
                    .col(Places::StateCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-places-category")
                    .table(Places::Table)
                    .col(Places::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Places::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(States::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TripRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trips::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
