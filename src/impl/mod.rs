// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod config_ron_datasource;
        pub(crate) mod entries_csv_datasource;
        pub(crate) mod in_memory_record_store_datasource;
        pub(crate) mod json_file_record_store_datasource;
        pub(crate) mod record_store_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod accounting_amount_model;
        pub(crate) mod attachment_model;
        pub(crate) mod billing_period_model;
        pub(crate) mod entry_model;
        pub(crate) mod settings_model;
        pub(crate) mod store_snapshot_model;
        pub(crate) mod timestamp_model;
        pub(crate) mod tracker_config_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod entries_repository_impl;
        pub(crate) mod in_memory_wallet_repository_impl;
        pub(crate) mod settings_repository_impl;
        pub(crate) mod unavailable_wallet_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod attachment;
        pub(crate) mod billing_period;
        pub(crate) mod calculated_payment;
        pub(crate) mod entry;
        pub(crate) mod payment_ledger;
        pub(crate) mod settings;
        pub(crate) mod tracker_config;
        pub(crate) mod wallet;
    }
    pub(crate) mod logic {
        pub(crate) mod entry_defaults;
        pub(crate) mod ledger_calculator;
        pub(crate) mod settings_resolver;
        pub(crate) mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod entries_repository;
        pub(crate) mod settings_repository;
        pub(crate) mod wallet_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod entries_usecase;
        pub(crate) mod ledger_usecase;
        pub(crate) mod settings_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod billing_period_fmt;
    pub(crate) mod ledger_csv_printer;
    pub(crate) mod payment_card_printer;
    pub(crate) mod statement_printer;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::attachment::*;
        pub use crate::domain::entities::billing_period::*;
        pub use crate::domain::entities::calculated_payment::*;
        pub use crate::domain::entities::entry::*;
        pub use crate::domain::entities::payment_ledger::*;
        pub use crate::domain::entities::settings::*;
        pub use crate::domain::entities::tracker_config::*;
        pub use crate::domain::entities::wallet::*;
    }

    pub mod logic {
        pub use crate::domain::logic::entry_defaults::new_entry_defaults;
        pub use crate::domain::logic::ledger_calculator::*;
        pub use crate::domain::logic::settings_resolver::*;
    }

    pub mod repositories {
        pub use crate::data::repositories::in_memory_wallet_repository_impl::InMemoryWalletRepository;
        pub use crate::data::repositories::unavailable_wallet_repository_impl::UnavailableWalletRepository;
        pub use crate::domain::repositories::wallet_repository::WalletRepository;
    }

    pub mod datasources {
        pub use crate::data::datasources::config_ron_datasource::{
            load_tracker_config, load_tracker_config_file,
        };
        pub use crate::data::datasources::in_memory_record_store_datasource::InMemoryRecordStoreDatasource;
        pub use crate::data::datasources::json_file_record_store_datasource::JsonFileRecordStoreDatasource;
        pub use crate::data::datasources::record_store_datasource::RecordStoreDatasource;
        pub use crate::data::models::attachment_model::AttachmentModel;
        pub use crate::data::models::entry_model::{EntryFieldsModel, EntryRecordModel};
        pub use crate::data::models::settings_model::SettingsModel;
        pub use crate::data::models::timestamp_model::TimestampModel;
    }

    pub mod presentation {
        pub use crate::presentation::utils::{format_accounting, format_amount};
    }
}
