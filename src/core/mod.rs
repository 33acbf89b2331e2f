pub mod vhdl;
