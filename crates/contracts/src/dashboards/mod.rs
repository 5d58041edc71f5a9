pub mod d100_fiscal_overview;
