//! Tic-Tac-Toe AI CLI
//!
//! 命令行界面，用于测试 AI
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 通信

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tictactoe_ai::{
    apply_action_to_notation, get_legal_moves_from_notation, get_node_count, minimax_value,
    reset_node_count, strategies_help, AIConfig, AIEngine, Board, Player, DEFAULT_STRATEGY,
};

#[derive(Parser)]
#[command(name = "tictactoe-ai")]
#[command(about = "Tic-Tac-Toe minimax engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 获取合法落子
    Moves {
        /// 棋盘记谱，如 "XX1/OO1/3"
        #[arg(long)]
        board: String,
    },

    /// 选择最佳落子
    Best {
        /// 棋盘记谱
        #[arg(long)]
        board: String,

        /// AI 策略 (minimax, random)
        #[arg(long, default_value = DEFAULT_STRATEGY)]
        strategy: String,

        /// 返回的落子数量
        #[arg(long, default_value = "1")]
        n: usize,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 局面结果与 minimax 分值
    Score {
        /// 棋盘记谱
        #[arg(long)]
        board: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 两个策略从空棋盘对弈一局
    Play {
        /// X 方策略
        #[arg(long, default_value = DEFAULT_STRATEGY)]
        x: String,

        /// O 方策略
        #[arg(long, default_value = DEFAULT_STRATEGY)]
        o: String,

        /// 随机种子
        #[arg(long)]
        seed: Option<u64>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize, Deserialize)]
struct MoveResult {
    #[serde(rename = "move")]
    mv: String,
    score: f64,
}

#[derive(Serialize, Deserialize)]
struct MovesResponse {
    moves: Vec<MoveResult>,
    total: usize,
}

#[derive(Serialize, Deserialize)]
struct ScoreInfo {
    board: String,
    player: String,
    winner: Option<String>,
    terminal: bool,
    utility: i32,
    result: String,
    /// X 视角的 minimax 分值
    value: i32,
}

#[derive(Serialize, Deserialize)]
struct PlayRecord {
    moves: Vec<String>,
    board: String,
    result: String,
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    board: String,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    n: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    action: Option<String>,
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<MoveResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    // score 命令的字段
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<ScoreInfo>,
    // apply 命令的字段
    #[serde(skip_serializing_if = "Option::is_none")]
    board: Option<String>,
}

impl ServerResponse {
    fn success_moves(moves: Vec<MoveResult>, nodes: u64, nps: f64, elapsed_ms: f64) -> Self {
        Self {
            ok: true,
            moves: Some(moves),
            nodes: Some(nodes),
            nps: Some(nps),
            elapsed_ms: Some(elapsed_ms),
            ..Default::default()
        }
    }

    fn success_legal_moves(legal_moves: Vec<String>) -> Self {
        Self {
            ok: true,
            legal_moves: Some(legal_moves),
            ..Default::default()
        }
    }

    fn success_score(score: ScoreInfo) -> Self {
        Self {
            ok: true,
            score: Some(score),
            ..Default::default()
        }
    }

    fn success_board(board: String) -> Self {
        Self {
            ok: true,
            board: Some(board),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn calc_nps(nodes: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        nodes as f64 / elapsed_secs
    } else {
        0.0
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.unwrap_or_else(|e| format!("{{\"ok\":false,\"error\":{:?}}}", e.to_string()))
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves { board } => match get_legal_moves_from_notation(&board) {
            Ok(moves) => {
                println!("Legal moves ({}):", moves.len());
                for mv in &moves {
                    println!("  {}", mv);
                }
            }
            Err(e) => fail(e),
        },

        Commands::Best {
            board,
            strategy,
            n,
            seed,
            json,
        } => {
            let config = AIConfig { seed };
            let ai = match AIEngine::from_strategy(&strategy, &config) {
                Ok(ai) => ai,
                Err(e) => fail(format!("{} ({})", e, strategies_help())),
            };

            // 重置计数器
            reset_node_count();
            let start = Instant::now();

            match ai.select_moves_notation(&board, n) {
                Ok(moves) => {
                    let elapsed = start.elapsed().as_secs_f64();
                    let nodes = get_node_count();
                    let nps = calc_nps(nodes, elapsed);

                    if json {
                        let response = MovesResponse {
                            total: moves.len(),
                            moves: moves
                                .into_iter()
                                .map(|(mv, score)| MoveResult { mv, score })
                                .collect(),
                        };
                        println!("{}", to_json(&response, true));
                        eprintln!(
                            "Stats: nodes={}, time={:.3}s, nps={:.0}",
                            nodes, elapsed, nps
                        );
                    } else {
                        println!("Best moves (strategy={}):", strategy);
                        if moves.is_empty() {
                            println!("  (game over)");
                        }
                        for (mv, score) in moves {
                            println!("  {} (score: {:.0})", mv, score);
                        }
                        println!(
                            "\nStats: nodes={}, time={:.3}s, nps={:.0}",
                            nodes, elapsed, nps
                        );
                    }
                }
                Err(e) => fail(e),
            }
        }

        Commands::Score { board, json } => match score_board(&board) {
            Ok(info) => {
                if json {
                    println!("{}", to_json(&info, true));
                } else {
                    println!("Board: {}", info.board);
                    println!("To move: {}", info.player);
                    println!("Result: {}", info.result);
                    println!(
                        "Winner: {}",
                        info.winner.as_deref().unwrap_or("none")
                    );
                    println!("Terminal: {}", info.terminal);
                    println!("Utility: {}", info.utility);
                    println!("Minimax value (X): {}", info.value);
                }
            }
            Err(e) => fail(e),
        },

        Commands::Play { x, o, seed, json } => match play_game(&x, &o, seed, !json) {
            Ok(record) => {
                if json {
                    println!("{}", to_json(&record, true));
                } else {
                    println!("Moves: {}", record.moves.join(" "));
                    println!("Result: {}", record.result);
                }
            }
            Err(e) => fail(e),
        },

        Commands::Server => {
            run_server();
        }
    }
}

/// 计算局面结果与分值
fn score_board(notation: &str) -> tictactoe_ai::Result<ScoreInfo> {
    let board = Board::from_notation(notation)?;
    Ok(ScoreInfo {
        board: board.to_notation(),
        player: board.current_player().to_string(),
        winner: board.winner().map(|p| p.to_string()),
        terminal: board.is_terminal(),
        utility: board.utility(),
        result: board.game_result().to_string(),
        value: minimax_value(&board),
    })
}

/// 两个策略对弈一局
fn play_game(
    x_strategy: &str,
    o_strategy: &str,
    seed: Option<u64>,
    verbose: bool,
) -> tictactoe_ai::Result<PlayRecord> {
    let config = AIConfig { seed };
    let x_ai = AIEngine::from_strategy(x_strategy, &config)?;
    let o_ai = AIEngine::from_strategy(o_strategy, &config)?;

    let mut board = Board::initial_state();
    let mut moves = Vec::new();

    while !board.is_terminal() {
        let player = board.current_player();
        let ai = match player {
            Player::X => &x_ai,
            Player::O => &o_ai,
        };
        let Some(action) = ai.select_best_move(&board) else {
            break;
        };
        board = board.apply_action(action)?;
        moves.push(action.to_notation());

        if verbose {
            if board.is_terminal() {
                println!("{} plays {}", player, action);
            } else {
                println!("{} plays {}, {} to move", player, action, player.opposite());
            }
            println!("{}", board);
        }
    }

    Ok(PlayRecord {
        moves,
        board: board.to_notation(),
        result: board.game_result().to_string(),
    })
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        // 解析请求
        let request: ServerRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = ServerResponse::error(&format!("Invalid JSON: {}", e));
                println!("{}", to_json(&response, false));
                let _ = stdout.flush();
                continue;
            }
        };

        // 处理命令
        let response = match request.cmd.as_str() {
            "best" => handle_best_request(&request),
            "moves" => handle_moves_request(&request),
            "score" => handle_score_request(&request),
            "apply" => handle_apply_request(&request),
            "quit" => break,
            _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
        };

        // 返回响应
        println!("{}", to_json(&response, false));
        let _ = stdout.flush();
    }
}

/// 处理 best 命令
fn handle_best_request(request: &ServerRequest) -> ServerResponse {
    let strategy = request.strategy.as_deref().unwrap_or(DEFAULT_STRATEGY);
    let n = request.n.unwrap_or(1);
    let config = AIConfig { seed: request.seed };

    let ai = match AIEngine::from_strategy(strategy, &config) {
        Ok(ai) => ai,
        Err(e) => return ServerResponse::error(&format!("Invalid strategy: {}", e)),
    };

    reset_node_count();
    let start = Instant::now();

    match ai.select_moves_notation(&request.board, n) {
        Ok(moves) => {
            let elapsed = start.elapsed().as_secs_f64();
            let nodes = get_node_count();
            let nps = calc_nps(nodes, elapsed);

            let move_results: Vec<MoveResult> = moves
                .into_iter()
                .map(|(mv, score)| MoveResult { mv, score })
                .collect();

            ServerResponse::success_moves(move_results, nodes, nps, elapsed * 1000.0)
        }
        Err(e) => ServerResponse::error(&format!("AI error: {}", e)),
    }
}

/// 处理 moves 命令
fn handle_moves_request(request: &ServerRequest) -> ServerResponse {
    match get_legal_moves_from_notation(&request.board) {
        Ok(moves) => ServerResponse::success_legal_moves(moves),
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 score 命令
fn handle_score_request(request: &ServerRequest) -> ServerResponse {
    match score_board(&request.board) {
        Ok(info) => ServerResponse::success_score(info),
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 apply 命令（在记谱上落子）
fn handle_apply_request(request: &ServerRequest) -> ServerResponse {
    let Some(action) = request.action.as_deref() else {
        return ServerResponse::error("Missing action");
    };
    match apply_action_to_notation(&request.board, action) {
        Ok(board) => ServerResponse::success_board(board),
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}
