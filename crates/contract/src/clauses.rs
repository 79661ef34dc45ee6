//! Fixed contract wording
//!
//! `{name}` placeholders are filled in by [`crate::TemplateBinder`]. Line
//! breaks in the source are insignificant; `<br/>` marks real breaks.

/// Document title
pub const TITLE: &str = "INSTRUMENTO PARTICULAR DE CONTRATO DE COMPRA E VENDA DE BENS DE CONSUMO COM ABERTURA DE CRÉDITO";

/// Contract body
pub const BODY: &str = r#"
Contrato de Compra e Venda de Bens de Consumo com abertura de crédito que celebram entre si, de um lado, a <b>{nome_filial}</b>, inscrita no CNPJ {cnpj_filial} estabelecida em Endereço {endereco_filial}, doravante denominada COMETA CALÇADOS, neste ato por seu preposto abaixo assinado, e do outro lado, <b>{nome_comprador}</b> RG {rg} CPF: {cpf} End.: {endereco}, {numero}- BA, doravante denominada COMPRADOR (A), através das cláusulas e condições seguintes:
<br/><br/>
<b>1. DO OBJETO.</b><br/>
1.1 O objeto do presente instrumento é abertura e concessão de crédito para futura aquisição de bens de consumo comercializados exclusivamente pela COMETA CALÇADOS, não sendo possível o uso do crédito concedido no presente contrato de qualquer outra forma. Os bens de consumo, comercializados pela COMETA CALÇADOS e doravante denominados MERCADORIAS, serão individualizados, descritos e precificados no(s) comprovante(s) de compra(s) devidamente assinado(s) pelo COMPRADOR(A) quando se der(em) a(s) sua(s) respetiva(s) aquisição(ões).
<br/><br/>
1.2 O COMPRADOR declara plena ciência e expressa concordância de que o(s) contrato(s) de compra e venda a serem firmados com base no crédito concedido por meio deste instrumento, o(s) qual(ais) será(ão) devidamente assinado(s) pelo COMPRADOR, mediante rubrica, conforme disposto no art. 784 do CPC, se constituirá em título executivo extrajudicial.
<br/><br/>
<b>2. DA CONCESSÃO E REVISÃO DO CRÉDITO</b><br/>
2.1. O(a) COMPRADOR(a) foi devidamente informado e declara plena ciência de que o crédito ora concedido somente poderá ser utilizado para aquisição de MERCADORIAS na própria loja COMETA CALÇADOS ora signatária, ou ainda, em qualquer uma das lojas cessionárias da marca COMETA CALÇADOS.
<br/><br/>
2.2. No momento da assinatura deste instrumento a COMETA CALÇADOS disponibiliza o(a) Comprador(a) o limite de crédito no importe de <b>R$ {limite_credito}</b> Reais para aquisição parcelada dos bens de consumo na própria loja COMETA CALÇADOS ora signatária, ou ainda, em qualquer uma das lojas cessionárias da marca COMETA CALÇADOS.
<br/><br/>
2.3. O(a) COMPRADOR(a) declara ter sido cientificado que a concessão e manutenção de crédito é revisada com base na Política de Crédito vigente na empresa, conforme informações regulamente consultadas nos bureaus de crédito, e assim tanto a concessão quanto o limite descrito no item 2.3 será reavaliado a cada aquisição de MERCADORIAS.
<br/><br/>
2.4. Em cumprimento ao item acima, e visando a concessão e manutenção do de crediário de forma sustentável, o(a) COMPRADOR(A) reconhece que a COMETA CALÇADOS poderá revisar o crédito disponibilizado, em virtude da variação positiva ou negativa do histórico de crédito do(a) próprio(a) COMPRADOR(a), e por esse motivo, o(a) COMPRADOR(A) autoriza a COMETA CALÇADOS realizar análises periódicas do seu perfil de crédito , podendo aumento ou diminuir o valor disponibilizado. O (a) COMPRADOR(A) poderá revogar a autorização para aumento de valores disponibilizados, a qualquer momento, através de solicitação por escrito na loja COMETA CALÇADOS.
<br/><br/>
2.5. O(a) COMPRADOR(a)resta cientificado(a) que o não pagamento de qualquer parcela dos contatos de compra e venda na sua respectiva data de vencimento definida e discriminada nos comprovantes de compra, ou a inclusão do seu CPF em cadastro de inadimplente por qualquer credor terceiro, são motivos suficientes para a imediata suspensão da concessão de crédito.
<br/><br/>
<b>3. DA FORMA E CONDIÇÕES DE PAGAMENTO.</b><br/>
3.1 No ato da aquisição das MERCADORIAS (a) COMPRADOR(A) receberá comprovantes de compra (carnê), representativo de sua dívida, onde constará os valores devidos à COMETA CALÇADOS as respectivas datas de vencimentos, o qual integrará o presente contrato para todos os efeitos.
<br/><br/>
3.2. O(a) COMPRADOR(a)se obriga a pagar a quantia indicada no contrato de venda e compra e MERCADORIAS de consumo conforme parcelamento com valores definidos e datas de vencimento discriminadas nos comprovantes de compra, portanto, o(a) COMPRADOR(a) efetuará o pagamento das parcelas com valores e datas de vencimento definidos e discriminados nos comprovantes de compra (carnê).
<br/><br/>
3.3. O limite máximo de parcelas, o qual é sempre baseado no valor mínimo de cada parcela, será estabelecido pela política de crédito da empresa trimestralmente e sempre será divulgado de forma ampla e irrestrita pela COMETA CALÇADOS em suas propagandas, banners, outdoors, redes e mídias sociais de internet, e ainda, na própria sede da loja em cartazes de publicidade.
<br/><br/>
3.4. Dessa forma, o(a) COMPRADOR(A) resta cientificado que o valor mínimo da prestação poderá ser revisado, para mais ou para menos, cabendo a ele(a) observar o valor mínimo da prestação, no moldo item acima, antes da realização de qualquer aquisição de MERCADORIAS.
<br/><br/>
<b>4. DO LOCAL DE PAGAMENTO.</b><br/>
Para que possa se valer de todas as modalidades de pagamento disponíveis (PIX, espécie, cartões de débito e crédito), (a) COMPRADOR(a) deverá efetuar os pagamentos das parcelas discriminadas nos comprovantes de compra na própria loja COMETA CALÇADOS em que foi realizada a aquisição dos bens os bens, cujo endereço está descrito no carnê de pagamentos. O (a) COMPRADOR(a) poderá efetuar o pagamento em loja COMETA CALÇADOS diversa da que foi realizada a aquisição dos MERCADORIAS, contudo, nessa hipótese não será possível a realização de pagamentos mediante o uso de cartões de crédito ou débito.
<br/><br/>
4.1. Na hipótese de pagamento das mensalidades com cartão de crédito/débito serão acrescidas as taxas de administração das operadoras de cartão.
<br/><br/>
<b>5. DO VENCIMENTO ANTECIPADO</b><br/>
O não pagamento de qualquer parcela na sua respectiva data de vencimento definida e discriminada nos comprovantes de compra por prazo superior a 30 (trinta) dias, conforme disposto no art. 394 do Código Civil, ocasionará, imediatamente, sem necessidade de qualquer notificação ou interpelação prévia, o vencimento antecipado de todas as parcelas vincendas à época do inadimplemento e a imediata execução do(s) contrato(s) de compra e venda a ser(em) firmado(s) com base no crédito concedido por meio deste instrumento.
<br/><br/>
<b>6. DA MULTA E DOS ENCARGOS DE MORA POR INADIMPLEMENTO</b><br/>
Em caso de atraso ou não pagamento das prestações pactuadas o Comprador estará sujeito ao pagamento da multa única de 2% indicada no art. § 1°do art. 52 do CDC, além de encargos moratórios mensais/pro rata dia incidentes sobre o valor inadimplido, os quais serão expressamente indicados no (s) contrato(s) de compra e venda a ser(em) firmado(s) (carnês) com base no crédito concedido no momento da aquisição.
<br/><br/>
<b>7. DA INSCRIÇÃO EM CADASTROS DE CONTROLE DE CRÉDITO.</b><br/>
7.1. Além das penalidades acima descritas, em caso de inadimplemento das obrigações pactuadas, persistindo o inadimplemento de qualquer parcela do carnê por mais de 15 (quinze) dias, confere a COMETA CALÇADOS o direito potestativo de inscrever o(a) COMPRADOR(A) em cadastros de inadimplentes (bureaus de crédito), tais como SPC, SERASA, etc.
<br/><br/>
<b>8. DO FORNECIMENTO E DA AUTORIZAÇÃO PARA TRATAMENTO DOS DADOS.</b><br/>
8.1. O(a) COMPRADOR(A), declara e assume inteira responsabilidade pelos dados fornecidos, confirmando a veracidade das informações prestadas, comprometendo-se a informar a Vendedora toda e qualquer alteração no seu endereço comercial e ou residencial.
<br/><br/>
8.2. Declaro meu expresso CONSENTIMENTO para que a {nome_filial}, inscrita no CNPJ {cnpj_filial} estabelecida em Endereço {endereco_filial}, doravante denominada COMETA CALÇADOS torne-se controladora dos dados por mim cedidos através deste documento, nos termos do artigo 5º, VI, da Lei Geral de Proteção de Dados (LGPD). Necessário ainda afirmar que esta autorização está sendo por mim concedida de maneira expressa conforme o art.7ª, I, e art. 8º da referida lei com o fito de instrumentalizar a execução do contrato de crediário dos futuros contratos de venda e compra a crediário por mim firmados com a controladora, para que esta tenha informações suficientes para cumprir com suas obrigações legais, os dados necessários para cumprimento das obrigações legais, assim como para a proteção ao crédito (Art.7º, II, V, X).
<br/><br/>
8.3. Ainda se destaca que estou ciente de que a controladora faz uso da marca COMETA CALÇADOS, de propriedade da COMETA ADMINISTRAÇÃO EMPRESARIAL , inscrita no CNPJ sob o registro 12.532.642/0001-10 . Assim sendo, declaro plena ciência e acordo que os dados aqui tratados poderão ser compartilhados e utilizados, em todo ou em parte, com pessoas físicas ou jurídicas, departamentos internos, setores e empresas vinculadas e/ou associadas a COMETA ADMINISTRAÇÃO EMPRESARIAL e as outras empresas cessionárias das marcas COMETA CALÇADOS.
<br/><br/>
8.4. A COMETA CALÇADOS declara e cientifica a(o) COMPRADOR(A), portanto, que no tratamento dos dados pessoais, sempre que necessário, ela poderá compartilhar os dados pessoais com outras empresas cessionárias da marca COMETA CALÇADOS (que se obrigam a manter idêntico nível de segurança e privacidade), com prestadores de serviços de análises antifraude, intermediação de pagamentos, cobrança terceirizada, empresas de confecção de material e envio de correspondência, gestão de campanhas de marketing, enriquecimento de base de dados e armazenamento em nuvem, bem como, os órgãos reguladores. A COMETA CALÇADOS declara e cientifica o(a) COMPRADOR(A) que não efetua a comercialização de dados pessoais. Apresentamos a seguir um resumo destas possibilidades:
<br/><br/>
8.5. O(a) COMPRADOR(A) se compromete a manter seus dados sempre atualizados, inclusive para efeito de comunicação entre as partes, e por esse motivo se compromete a informar todas as alterações em seu endereço residencial e profissional e dados eletrônicos. O(a) COMPRADOR(A) declara ter sido cientificado que em caso de não comunicação de alteração dos seus dados pessoais, considerar-se-á válida a notificação enviada ao endereço indicado pelo comprador no ato da assinatura do presente contrato, para o fim do que dispõe o artigo 43 parágrafo segundo do Código de Defesa do Consumidor.
<br/><br/>
<b>9. DAS CONDIÇÕES GERAIS.</b><br/>
9.1 As partes procurarão sempre o comum acordo para resolverem as pendências, lacunas e omissões que emergirem deste contrato.
<br/><br/>
9.2. Para dirimir as controvérsias e pendencias oriundas da aplicação deste contrato, fica eleito o foro da comarca do domicílio do(a) COMPRADOR(A).
"#;

/// Paragraph after the body, before the date line
pub const CLOSING: &str = "E por estarem assim ajustado assinam o presente, em 02 Vias, para que produza os jurídicos e legais efeitos, na presença de suas testemunhas.";

/// `{cidade}, {dia} de {mes} de {ano}`
pub const DATE_LINE: &str = "{cidade}, {dia} de {mes} de {ano}";

/// Registration notice after the signatures
pub const REGISTRATION_NOTICE: &str = "Obs. O presente contrato está registrado no Cartório de Títulos e Documentos da Comarca de {cidade}.";

/// Heading of the attachments section
pub const ATTACHMENTS_HEADING: &str = "DOCUMENTOS ANEXADOS";

/// Line drawn above each signature caption
pub const SIGNATURE_LINE: &str = "_________________________";

pub const CAPTION_BUYER: &str = "Comprador(a): {nome_comprador}";
pub const CAPTION_SELLER: &str = "Vendedor(a)";
pub const CAPTION_WITNESS1: &str = "Testemunha 1<br/>R.G:";
pub const CAPTION_WITNESS2: &str = "Testemunha 2<br/>R.G:";

/// Default watermark word
pub const WATERMARK: &str = "COMETA";
