//! 井字棋测试局面库
//!
//! 提供命名的记谱测试局面，方便测试和调试
//!
//! 命名规范:
//! - START: 初始局面
//! - MID_*: 未结束的中局
//! - *_TO_WIN_* / *_MUST_BLOCK: 战术局面
//! - *_WON_* / DRAW_*: 终局

// =============================================================================
// 开局与中局
// =============================================================================

/// 初始局面 - 全部为空，X 先行
pub const START: &str = "3/3/3";

/// X 占中心和角，O 占一角，轮到 O
pub const MID_GAME: &str = "X2/1O1/2X";

// =============================================================================
// 战术局面
// =============================================================================

/// X 可以在 (0,2) 连成第 0 行，O 同时威胁第 1 行；X 应取胜而不是去堵
pub const X_TO_WIN_OR_BLOCK: &str = "XX1/OO1/3";

/// O 可以在 (1,2) 连成第 1 行，X 同时威胁第 0 行
pub const O_TO_WIN_OR_BLOCK: &str = "XX1/OO1/X2";

/// X 威胁主对角线，O 必须堵 (2,2)
pub const O_MUST_BLOCK: &str = "X1O/1X1/3";

// =============================================================================
// 终局
// =============================================================================

/// X 连成第 0 行
pub const X_WON_ROW: &str = "XXX/OO1/3";

/// O 连成第 1 列
pub const O_WON_COLUMN: &str = "XO1/XO1/1OX";

/// X 连成主对角线
pub const X_WON_DIAGONAL: &str = "XO1/OX1/2X";

/// X 连成副对角线
pub const X_WON_ANTI_DIAGONAL: &str = "OOX/1X1/X2";

/// 下满且无人连线
pub const DRAW_FULL: &str = "XOX/XOO/OXX";

/// 所有局面（用于批量测试）
pub const ALL_POSITIONS: &[(&str, &str)] = &[
    ("START", START),
    ("MID_GAME", MID_GAME),
    ("X_TO_WIN_OR_BLOCK", X_TO_WIN_OR_BLOCK),
    ("O_TO_WIN_OR_BLOCK", O_TO_WIN_OR_BLOCK),
    ("O_MUST_BLOCK", O_MUST_BLOCK),
    ("X_WON_ROW", X_WON_ROW),
    ("O_WON_COLUMN", O_WON_COLUMN),
    ("X_WON_DIAGONAL", X_WON_DIAGONAL),
    ("X_WON_ANTI_DIAGONAL", X_WON_ANTI_DIAGONAL),
    ("DRAW_FULL", DRAW_FULL),
];
