//! Keys observed in `config/config.json`.

pub const MAIN_WORKBOOK_PATH: &str = "main_workbook_path";
pub const HOUSE_PLAN_DIR: &str = "housePlan_dir";
pub const ESTATE_PLAN_DIR: &str = "estatePlan_dir";
pub const FAMILY_MEMBER_DIR: &str = "familyMember_dir";

pub const ROW_NUMBER: &str = "row_number";
pub const TABLE_NAME: &str = "table_name";
pub const REGION: &str = "region";

/// Field name → cell text of the row loaded from the workbook.
pub const CURRENT_DATA_ROW: &str = "current_data_row";

pub const ESTATE_SURVEY_PROJECT_NAME: &str = "estate_survey_project_name";

/// Parcel area (宗地面积) and its upper bound.
pub const ZDMJ: &str = "zdmj";
pub const ZDMJ_MAX: &str = "zdmj_max";
pub const JZMD_MAX: &str = "jzmd_max";

pub const DEFAULT_ZDMJ_MAX: u64 = 150;
pub const DEFAULT_JZMD_MAX: u64 = 450;
